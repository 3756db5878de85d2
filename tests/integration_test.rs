//! Integration tests for projscope
//!
//! These tests write catalog, score table and config files to temporary
//! directories and drive the engine through the public API the way the
//! command-line client does.

use projscope::catalog;
use projscope::config::ProjscopeConfig;
use projscope::engine::VisibilityEngine;
use projscope::output::{self, OutputFormat, Row};
use projscope::query::{QueryState, SortMode, url};
use projscope::ranking::ScoreTable;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CATALOG: &str = r#"{
  "projects": [
    { "title": "Calculator",     "category": "Tools",   "folder": "calculator", "rating": 4.1, "dateAdded": "2024-01-10" },
    { "title": "Snake Game",     "category": "Games",   "folder": "snake",      "rating": 4.6, "dateAdded": "2024-02-01" },
    { "title": "Weather App",    "category": "Tools",   "folder": "weather",    "rating": 3.9, "dateAdded": "2024-03-15" },
    { "title": "Tic Tac Toe",    "category": "Games",   "name": "tictactoe",    "rating": 3.2, "dateAdded": "2023-11-05" },
    { "title": "Periodic Table", "category": "Science",                         "rating": 5.0, "dateAdded": "2024-01-22" },
    { "title": "Pomodoro Timer", "category": "Tools",   "folder": "pomodoro",                  "dateAdded": "2023-12-01" },
    { "title": "Memory Cards",   "category": "Games",   "folder": "memory",     "rating": 2.8, "dateAdded": "2024-03-01" },
    { "title": "Solar System",   "category": "Science", "folder": "solar",      "rating": 4.4 }
  ]
}"#;

const SCORES: &str = r#"{
  "scores": { "weather": 40.0, "snake": 25.5, "calculator": 12.0, "retired-project": 99.0 },
  "badges": { "snake": { "type": "hot", "label": "Hot" } },
  "hiddenGems": { "solar": 7.5, "memory": 3.0 }
}"#;

/// Helper function to write a file into the temporary directory
fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Helper function to build an engine from files on disk
fn setup_engine(dir: &TempDir, items_per_page: usize, with_scores: bool) -> VisibilityEngine {
    let catalog_path = write_file(dir.path(), "projects.json", CATALOG);
    let mut builder = VisibilityEngine::builder()
        .items(catalog::load(&catalog_path).unwrap())
        .items_per_page(items_per_page);
    if with_scores {
        let scores_path = write_file(dir.path(), "scores.json", SCORES);
        builder = builder.ranking_source(ScoreTable::load(&scores_path).unwrap());
    }
    builder.build().unwrap()
}

fn titles(items: &[&projscope::Item]) -> Vec<String> {
    items.iter().map(|item| item.title.clone()).collect()
}

#[test]
fn test_initial_view_is_first_page_in_catalog_order() {
    let dir = TempDir::new().unwrap();
    let engine = setup_engine(&dir, 3, false);

    assert_eq!(engine.items().len(), 8);
    assert_eq!(engine.state(), &QueryState::default());
    assert_eq!(
        titles(&engine.paginated_items()),
        vec!["Calculator", "Snake Game", "Weather App"]
    );
    assert_eq!(engine.total_pages(), 3);
}

#[test]
fn test_search_and_category_combine() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 10, false);

    engine.toggle_category("TOOLS");
    engine.set_search_query("  ");
    assert!(engine.is_empty());

    engine.set_search_query("AT");
    assert_eq!(titles(&engine.visible_items()), vec!["Calculator", "Weather App"]);

    engine.toggle_category("games");
    engine.set_search_query("a");
    assert_eq!(
        titles(&engine.visible_items()),
        vec!["Calculator", "Snake Game", "Weather App", "Tic Tac Toe", "Memory Cards"]
    );
}

#[test]
fn test_every_visible_item_passes_the_filter() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 10, false);
    engine.set_search_query("e");
    engine.toggle_category("science");
    engine.toggle_category("games");

    let visible = engine.visible_items();
    assert!(!visible.is_empty());
    for item in visible {
        assert!(item.title.to_lowercase().contains('e'));
        let category = item.category.as_deref().unwrap().to_lowercase();
        assert!(category == "science" || category == "games");
    }
}

#[test]
fn test_criteria_changes_reset_page() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 2, false);

    engine.set_page(3);
    engine.set_search_query("a");
    assert_eq!(engine.state().page(), 1);

    engine.set_page(2);
    engine.toggle_category("tools");
    assert_eq!(engine.state().page(), 1);

    engine.set_page(2);
    engine.set_sort_mode(SortMode::AlphabeticalDesc);
    assert_eq!(engine.state().page(), 1);

    engine.set_page(2);
    assert!(engine.set_sort_mode_str("sideways").is_err());
    assert_eq!(engine.state().page(), 2);
    assert_eq!(engine.state().sort_mode(), SortMode::AlphabeticalDesc);
}

#[test]
fn test_pages_partition_the_visible_list() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 3, false);
    engine.set_sort_mode(SortMode::AlphabeticalAsc);

    let all = titles(&engine.visible_items());
    let mut paged = Vec::new();
    for page in 1..=engine.total_pages() {
        engine.set_page(page);
        let slice = engine.paginated_items();
        assert!(slice.len() <= 3);
        paged.extend(titles(&slice));
    }
    assert_eq!(paged, all);

    engine.set_page(engine.total_pages() + 1);
    assert!(engine.paginated_items().is_empty());
}

#[test]
fn test_sorts_over_loaded_catalog() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 10, false);

    engine.set_sort_mode(SortMode::NewestFirst);
    let newest = engine.visible_items();
    assert_eq!(newest[0].title, "Weather App");
    assert_eq!(newest.last().unwrap().title, "Solar System");

    engine.set_sort_mode(SortMode::RatingDesc);
    let best = engine.visible_items();
    assert_eq!(best[0].title, "Periodic Table");
    assert_eq!(best.last().unwrap().title, "Pomodoro Timer");

    engine.set_sort_mode(SortMode::RatingAsc);
    assert_eq!(engine.visible_items()[0].title, "Pomodoro Timer");
}

#[test]
fn test_sorting_does_not_change_membership() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 10, true);
    engine.toggle_category("games");

    let mut baseline = titles(&engine.visible_items());
    baseline.sort();
    for mode in SortMode::ALL {
        engine.set_sort_mode(mode);
        let mut sorted = titles(&engine.visible_items());
        sorted.sort();
        assert_eq!(sorted, baseline, "membership changed under {mode}");
    }
}

#[test]
fn test_trending_sort_uses_score_table() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 10, true);
    engine.set_sort_mode(SortMode::Trending);

    let visible = titles(&engine.visible_items());
    assert_eq!(&visible[..3], ["Weather App", "Snake Game", "Calculator"]);
    // Unscored items keep catalog order behind the scored ones
    assert_eq!(
        &visible[3..],
        ["Tic Tac Toe", "Periodic Table", "Pomodoro Timer", "Memory Cards", "Solar System"]
    );
}

#[test]
fn test_trending_sort_without_scores_keeps_catalog_order() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 10, false);
    let catalog_order = titles(&engine.visible_items());

    engine.set_sort_mode(SortMode::Trending);
    assert_eq!(titles(&engine.visible_items()), catalog_order);
}

#[test]
fn test_discovery_lists_from_score_table() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 10, true);
    // Discovery ignores the current query
    engine.set_search_query("zzz");

    let trending: Vec<_> = engine
        .trending_items(3)
        .iter()
        .map(|s| (s.item.title.clone(), s.score))
        .collect();
    // "retired-project" has no catalog entry and is dropped
    assert_eq!(
        trending,
        vec![("Weather App".to_string(), 40.0), ("Snake Game".to_string(), 25.5)]
    );

    let gems: Vec<String> = engine
        .hidden_gems(5)
        .iter()
        .map(|s| s.item.title.clone())
        .collect();
    assert_eq!(gems, vec!["Solar System", "Memory Cards"]);
}

#[test]
fn test_discovery_without_ranking_is_empty() {
    let dir = TempDir::new().unwrap();
    let engine = setup_engine(&dir, 10, false);
    assert!(engine.trending_items(10).is_empty());
    assert!(engine.hidden_gems(5).is_empty());
}

#[test]
fn test_badges_follow_visible_order() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 10, true);
    engine.toggle_category("games");

    let badged = engine.items_with_badges();
    let labels: Vec<Option<&str>> = badged
        .iter()
        .map(|b| b.badge.as_ref().map(|badge| badge.label.as_str()))
        .collect();
    assert_eq!(labels, vec![Some("Hot"), None, None]);
    assert_eq!(badged[0].badge.as_ref().unwrap().kind.as_deref(), Some("hot"));
}

#[test]
fn test_url_round_trip_restores_view() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 2, false);
    engine.set_search_query("a");
    engine.toggle_category("games");
    engine.toggle_category("tools");
    engine.set_collection(Some("spring jam".to_string()));
    engine.set_sort_mode(SortMode::AlphabeticalAsc);
    engine.set_page(2);

    let encoded = url::encode(engine.state());
    assert_eq!(
        encoded,
        "category=games&category=tools&search=a&sort=az&page=2&collection=spring%20jam"
    );

    let mut restored = setup_engine(&dir, 2, false);
    restored.replace_state(url::decode(&format!("?{encoded}")));
    assert_eq!(restored.state(), engine.state());
    assert_eq!(
        titles(&restored.paginated_items()),
        titles(&engine.paginated_items())
    );
}

#[test]
fn test_url_decode_tolerates_garbage() {
    let state = url::decode("sort=hottest&page=-4&search=Tic%20Tac&unknown=1");
    assert_eq!(state.sort_mode(), SortMode::Default);
    assert_eq!(state.page(), 1);
    assert_eq!(state.search_query(), "tic tac");
}

#[test]
fn test_reset_returns_to_initial_state() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 3, true);
    engine.set_search_query("game");
    engine.toggle_category("games");
    engine.set_sort_mode(SortMode::Trending);
    engine.set_page(2);

    engine.reset();
    assert_eq!(engine.state(), &QueryState::default());
    assert_eq!(url::encode(engine.state()), "");
}

#[test]
fn test_missing_catalog_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = catalog::load(dir.path().join("nope.json"));
    assert!(matches!(result, Err(catalog::CatalogError::Io { .. })));
}

#[test]
fn test_config_file_drives_page_size() {
    let dir = TempDir::new().unwrap();
    let catalog_path = write_file(dir.path(), "projects.json", CATALOG);
    let config_path = write_file(
        dir.path(),
        "config.toml",
        &format!("items_per_page = 5\ncatalog = {:?}\n", catalog_path.display().to_string()),
    );

    let config = ProjscopeConfig::load_from(&config_path).unwrap();
    let engine = VisibilityEngine::builder()
        .items(catalog::load(config.catalog.as_ref().unwrap()).unwrap())
        .items_per_page(config.items_per_page)
        .build()
        .unwrap();

    assert_eq!(engine.paginated_items().len(), 5);
    assert_eq!(engine.total_pages(), 2);
}

#[test]
fn test_zero_page_size_is_rejected() {
    let result = VisibilityEngine::builder().items_per_page(0).build();
    assert!(result.is_err());
}

#[test]
fn test_render_page_as_json() {
    let dir = TempDir::new().unwrap();
    let mut engine = setup_engine(&dir, 2, false);
    engine.set_sort_mode(SortMode::RatingDesc);

    let page = engine.paginated_items();
    let rows: Vec<Row<'_>> = page.iter().map(|item| Row::from(*item)).collect();
    let rendered = output::render(&rows, OutputFormat::Json, false).unwrap();

    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value[0]["title"], "Periodic Table");
    assert_eq!(value[1]["title"], "Snake Game");
    assert_eq!(value[1]["folder"], "snake");
}
