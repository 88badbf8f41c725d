//! Tests for repository sources

use repolog::Error;
use repolog::core::services::source;

use crate::common::MockLister;

#[tokio::test]
async fn test_listing_strips_roots() {
    let lister = MockLister::new(
        &["/home/u/ghq/", "/work/src"],
        &["/home/u/ghq/github.com/a/b", "/work/src/team/tool", "/elsewhere/x"],
    );

    let repos = source::from_listing(&lister).await.unwrap().collect_records().await.unwrap();

    let short: Vec<_> = repos.iter().map(|repo| repo.short_path()).collect();
    assert_eq!(short, vec!["github.com/a/b", "team/tool", "elsewhere/x"]);
    let names: Vec<_> = repos.iter().map(|repo| repo.name()).collect();
    assert_eq!(names, vec!["b", "tool", "x"]);
}

#[tokio::test]
async fn test_listing_first_matching_root_wins() {
    let lister = MockLister::new(&["/src", "/src/nested"], &["/src/nested/repo"]);

    let repos = source::from_listing(&lister).await.unwrap().collect_records().await.unwrap();

    assert_eq!(repos[0].short_path(), "nested/repo");
}

#[tokio::test]
async fn test_failing_roots_yields_no_listing() {
    let lister = MockLister::new(&["/r"], &["/r/a"]).failing_roots();

    let err = source::from_listing(&lister).await.unwrap_err();

    assert!(matches!(err, Error::Startup { .. }));
    assert_eq!(lister.paths_queried(), 0);
}

#[tokio::test]
async fn test_failing_paths_is_an_error() {
    let lister = MockLister::new(&["/r"], &["/r/a"]).failing_paths();

    let err = source::from_listing(&lister).await.unwrap_err();

    assert!(matches!(err, Error::Startup { ref command, .. } if command == "mock list"));
}

#[tokio::test]
async fn test_empty_listing_is_empty_stream() {
    let lister = MockLister::new(&["/r"], &[]);

    let repos = source::from_listing(&lister).await.unwrap().collect_records().await.unwrap();

    assert!(repos.is_empty());
}
