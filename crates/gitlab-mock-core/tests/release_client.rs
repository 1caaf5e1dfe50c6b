// crates/gitlab-mock-core/tests/release_client.rs
// ============================================================================
// Module: Release Facade Tests
// Description: CRUD, permission, and query behavior of the release facade.
// Purpose: Validate release lifecycle semantics against the seeded fixture.
// Dependencies: gitlab-mock-core, time, tokio
// ============================================================================
//! ## Overview
//! Exercises create/read/update/delete, tier enforcement with no partial
//! mutation, query ordering and pagination, and the async entry points.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use common::PROJECT_PATH;
use common::START;
use common::fixture;
use common::release;
use gitlab_mock_core::ErrorKind;
use gitlab_mock_core::MockError;
use gitlab_mock_core::ProjectId;
use gitlab_mock_core::ReleaseCreate;
use gitlab_mock_core::ReleaseQuery;
use gitlab_mock_core::ReleaseUpdate;
use time::Duration;
use time::macros::datetime;

/// Collects tag names in response order.
fn tags(items: impl IntoIterator<Item = gitlab_mock_core::ReleaseInfo>) -> Vec<String> {
    items.into_iter().map(|info| info.tag_name.to_string()).collect()
}

// ============================================================================
// SECTION: Binding
// ============================================================================

/// Verifies numeric ids and namespace paths resolve to the same project.
#[test]
fn bind_resolves_id_and_path_to_same_project() {
    let fx = fixture();
    let client = fx.client(fx.developer);
    let by_path = client.releases(PROJECT_PATH).unwrap();
    let by_id = client.releases(fx.project).unwrap();
    let by_numeric_string = client.releases("1").unwrap();
    assert_eq!(by_path.project_id(), fx.project);
    assert_eq!(by_id.project_id(), fx.project);
    assert_eq!(by_numeric_string.project_id(), fx.project);
}

/// Verifies binding to a missing project fails with not found.
#[test]
fn bind_missing_project_is_not_found() {
    let fx = fixture();
    let client = fx.client(fx.developer);
    let err = client.releases("acme/missing").err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = client.releases(ProjectId::new(99)).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ============================================================================
// SECTION: Create and Read
// ============================================================================

/// Verifies a created release reads back with identical fields.
#[test]
fn create_then_get_returns_identical_release() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(PROJECT_PATH).unwrap();
    let created = releases
        .create(&ReleaseCreate {
            tag_name: "v1.0.0".into(),
            name: Some("First".to_string()),
            git_ref: Some("main".to_string()),
            description: Some("Initial release".to_string()),
            released_at: None,
        })
        .unwrap();
    assert_eq!(created.created_at, START);
    assert_eq!(created.released_at, START);
    assert_eq!(created.author_id, fx.developer);
    assert_eq!(created.author.as_ref().map(|author| author.username.as_str()), Some("dev"));

    let fetched = releases.get("v1.0.0").unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name.as_deref(), Some("First"));
    assert_eq!(fetched.git_ref.as_deref(), Some("main"));
    assert_eq!(fetched.description.as_deref(), Some("Initial release"));
}

/// Verifies an explicit released_at overrides the creation instant.
#[test]
fn create_honors_explicit_released_at() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    let released_at = datetime!(2030-05-01 12:00 UTC);
    let created = releases
        .create(&ReleaseCreate {
            tag_name: "v2".into(),
            released_at: Some(released_at),
            ..ReleaseCreate::default()
        })
        .unwrap();
    assert_eq!(created.created_at, START);
    assert_eq!(created.released_at, released_at);
}

/// Verifies a duplicate tag is rejected with conflict.
#[test]
fn create_duplicate_tag_conflicts() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    releases.create(&release("v1")).unwrap();
    let err = releases.create(&release("v1")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(releases.all().unwrap().len(), 1);
}

/// Verifies tags are compared case-sensitively.
#[test]
fn tags_differing_in_case_are_distinct() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    releases.create(&release("v1-rc")).unwrap();
    releases.create(&release("V1-RC")).unwrap();
    assert_eq!(tags(releases.all().unwrap()), vec!["v1-rc", "V1-RC"]);
    assert!(releases.get("V1-rc").unwrap().is_none());
}

/// Verifies reading a missing tag is absent rather than an error.
#[test]
fn get_missing_tag_is_none() {
    let fx = fixture();
    let releases = fx.client(fx.reporter).releases(fx.project).unwrap();
    assert!(releases.get("nope").unwrap().is_none());
}

// ============================================================================
// SECTION: Update
// ============================================================================

/// Verifies a description-only update leaves other fields unchanged.
#[test]
fn update_description_only_is_partial() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    let created = releases
        .create(&ReleaseCreate {
            tag_name: "v1".into(),
            name: Some("One".to_string()),
            description: Some("old".to_string()),
            ..ReleaseCreate::default()
        })
        .unwrap();
    fx.tick(60);
    let payload = ReleaseUpdate {
        tag_name: "v1".into(),
        description: Some("new".to_string()),
        ..ReleaseUpdate::default()
    };
    let first = releases.update(&payload).unwrap();
    assert_eq!(first.description.as_deref(), Some("new"));
    assert_eq!(first.name, created.name);
    assert_eq!(first.released_at, created.released_at);
    assert_eq!(first.created_at, created.created_at);

    let second = releases.update(&payload).unwrap();
    assert_eq!(second, first);
}

/// Verifies updating released_at never moves created_at.
#[test]
fn update_released_at_keeps_created_at() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    releases.create(&release("v1")).unwrap();
    fx.tick(3600);
    let moved = START + Duration::days(3);
    let updated = releases
        .update(&ReleaseUpdate {
            tag_name: "v1".into(),
            name: Some("Renamed".to_string()),
            released_at: Some(moved),
            ..ReleaseUpdate::default()
        })
        .unwrap();
    assert_eq!(updated.created_at, START);
    assert_eq!(updated.released_at, moved);
    assert_eq!(updated.name.as_deref(), Some("Renamed"));
}

/// Verifies updating a missing tag fails with not found.
#[test]
fn update_missing_tag_is_not_found() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    let err = releases
        .update(&ReleaseUpdate {
            tag_name: "ghost".into(),
            ..ReleaseUpdate::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ============================================================================
// SECTION: Delete
// ============================================================================

/// Verifies the second targeted delete of a tag fails with not found.
#[test]
fn delete_twice_fails_second_time() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    releases.create(&release("v1")).unwrap();
    releases.delete("v1").unwrap();
    let err = releases.delete("v1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(releases.get("v1").unwrap().is_none());
}

/// Verifies re-creating a removed tag yields a fresh release.
#[test]
fn recreate_after_delete_is_new_instance() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    releases.create(&release("v1")).unwrap();
    releases.delete("v1").unwrap();
    fx.tick(10);
    let again = releases.create(&release("v1")).unwrap();
    assert_eq!(again.created_at, START + Duration::seconds(10));
}

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Verifies a View-only member cannot create and the store is unchanged.
#[test]
fn view_only_create_is_forbidden_without_mutation() {
    let fx = fixture();
    let dev = fx.client(fx.developer).releases(fx.project).unwrap();
    dev.create(&release("v1")).unwrap();

    let reporter = fx.client(fx.reporter).releases(fx.project).unwrap();
    let err = reporter.create(&release("v2")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    let err = reporter.delete("v1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    let err = reporter
        .update(&ReleaseUpdate {
            tag_name: "v1".into(),
            name: Some("hijack".to_string()),
            ..ReleaseUpdate::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let all = reporter.all().unwrap();
    assert_eq!(tags(all.clone()), vec!["v1"]);
    assert_eq!(all[0].name, None);
}

/// Verifies users without any tier cannot even read releases.
#[test]
fn outsider_read_is_forbidden() {
    let fx = fixture();
    let releases = fx.client(fx.outsider).releases(fx.project).unwrap();
    assert_eq!(releases.all().unwrap_err().kind(), ErrorKind::Forbidden);
    assert_eq!(releases.get("v1").unwrap_err().kind(), ErrorKind::Forbidden);
    assert_eq!(releases.query(None).unwrap_err().kind(), ErrorKind::Forbidden);
}

/// Verifies group maintainers and admins inherit write access.
#[test]
fn group_maintainer_and_admin_can_create() {
    let fx = fixture();
    fx.client(fx.maintainer).releases(fx.project).unwrap().create(&release("m1")).unwrap();
    fx.client(fx.admin).releases(fx.project).unwrap().create(&release("a1")).unwrap();
    let all = fx.client(fx.reporter).releases(fx.project).unwrap().all().unwrap();
    assert_eq!(tags(all), vec!["m1", "a1"]);
}

// ============================================================================
// SECTION: Queries
// ============================================================================

/// Seeds three releases with distinct released_at values plus a tie.
fn seed_dated(fx: &common::Fixture) {
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    for (tag, released_at) in [
        ("mid", datetime!(2021-01-01 00:00 UTC)),
        ("late", datetime!(2021-06-01 00:00 UTC)),
        ("early", datetime!(2020-01-01 00:00 UTC)),
        ("mid-tie", datetime!(2021-01-01 00:00 UTC)),
    ] {
        releases
            .create(&ReleaseCreate {
                tag_name: tag.into(),
                released_at: Some(released_at),
                ..ReleaseCreate::default()
            })
            .unwrap();
        fx.tick(1);
    }
}

/// Verifies no query returns insertion order.
#[test]
fn query_without_parameters_keeps_insertion_order() {
    let fx = fixture();
    seed_dated(&fx);
    let releases = fx.client(fx.reporter).releases(fx.project).unwrap();
    assert_eq!(tags(releases.query(None).unwrap()), vec!["mid", "late", "early", "mid-tie"]);
}

/// Verifies ascending released_at order keeps ties in insertion order.
#[test]
fn query_ascending_is_stable() {
    let fx = fixture();
    seed_dated(&fx);
    let releases = fx.client(fx.reporter).releases(fx.project).unwrap();
    let query = ReleaseQuery {
        sort: Some("asc".to_string()),
        ..ReleaseQuery::default()
    };
    let listed = releases.query(Some(&query)).unwrap();
    assert_eq!(tags(listed), vec!["early", "mid", "mid-tie", "late"]);
}

/// Verifies the default order is descending by released_at with stable ties.
#[test]
fn query_default_is_descending_released_at() {
    let fx = fixture();
    seed_dated(&fx);
    let releases = fx.client(fx.reporter).releases(fx.project).unwrap();
    let query = ReleaseQuery::default();
    let listed = releases.query(Some(&query)).unwrap();
    assert_eq!(tags(listed), vec!["late", "mid", "mid-tie", "early"]);
}

/// Verifies ordering by created_at follows creation order.
#[test]
fn query_by_created_at_ascending() {
    let fx = fixture();
    seed_dated(&fx);
    let releases = fx.client(fx.reporter).releases(fx.project).unwrap();
    let query = ReleaseQuery {
        order_by: Some("created_at".to_string()),
        sort: Some("asc".to_string()),
        ..ReleaseQuery::default()
    };
    let listed = releases.query(Some(&query)).unwrap();
    assert_eq!(tags(listed), vec!["mid", "late", "early", "mid-tie"]);
}

/// Verifies page two of size two over five items starts at the third item.
#[test]
fn query_pagination_skips_leading_pages() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    for tag in ["r1", "r2", "r3", "r4", "r5"] {
        releases.create(&release(tag)).unwrap();
        fx.tick(1);
    }
    let query = ReleaseQuery {
        order_by: Some("created_at".to_string()),
        sort: Some("asc".to_string()),
        page: Some(2),
        per_page: Some(2),
        ..ReleaseQuery::default()
    };
    let page = releases.query(Some(&query)).unwrap();
    assert_eq!(tags(page), vec!["r3", "r4", "r5"]);
}

/// Verifies page zero is treated as the first page.
#[test]
fn query_page_zero_is_first_page() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    releases.create(&release("only")).unwrap();
    let query = ReleaseQuery {
        page: Some(0),
        ..ReleaseQuery::default()
    };
    assert_eq!(tags(releases.query(Some(&query)).unwrap()), vec!["only"]);
}

/// Verifies requesting HTML descriptions is not supported.
#[test]
fn query_html_description_is_not_supported() {
    let fx = fixture();
    let releases = fx.client(fx.reporter).releases(fx.project).unwrap();
    let query = ReleaseQuery {
        include_html_description: Some(true),
        ..ReleaseQuery::default()
    };
    let err = releases.query(Some(&query)).unwrap_err();
    assert!(matches!(err, MockError::NotSupported(_)));
}

/// Verifies release links are not supported.
#[test]
fn release_links_are_not_supported() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    let err = releases.release_links("v1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotSupported);
}

// ============================================================================
// SECTION: Async Entry Points
// ============================================================================

/// Verifies async wrappers run the same lifecycle as the sync paths.
#[tokio::test]
async fn async_wrappers_follow_sync_semantics() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    releases.create_async(&release("v1")).await.unwrap();
    let err = releases.create_async(&release("v1")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let updated = releases
        .update_async(&ReleaseUpdate {
            tag_name: "v1".into(),
            description: Some("async".to_string()),
            ..ReleaseUpdate::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("async"));

    let listed = releases.query_async(None).await.unwrap();
    assert_eq!(listed.len(), 1);

    releases.delete_async("v1").await.unwrap();
    let err = releases.delete_async("v1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Verifies concurrent async creates on a multi-threaded runtime all land.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn async_creates_from_tasks_are_all_visible() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    let mut handles = Vec::new();
    for index in 0 .. 8 {
        let releases = releases.clone();
        handles.push(tokio::spawn(async move {
            releases.create_async(&release(&format!("t{index}"))).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(releases.all().unwrap().len(), 8);
}

/// Verifies a negative page is treated as the first page.
#[test]
fn query_negative_page_is_first_page() {
    let fx = fixture();
    let releases = fx.client(fx.developer).releases(fx.project).unwrap();
    releases.create(&release("only")).unwrap();
    let query = ReleaseQuery {
        page: Some(-4),
        ..ReleaseQuery::default()
    };
    assert_eq!(tags(releases.query(Some(&query)).unwrap()), vec!["only"]);
}
