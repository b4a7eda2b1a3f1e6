use taskdeck_core::Bucket;
use taskdeck_server::task::{NewTask, TaskError, TaskPatch, TaskService};

mod common;

fn new_task(title: &str) -> NewTask {
    NewTask {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn created_task_round_trips_with_defaults() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);

    let created = service.create(new_task("x")).await.unwrap();
    let fetched = service.get_by_id(created.id).await.unwrap();

    assert_eq!(fetched.title, "x");
    assert_eq!(fetched.description, "");
    assert!(!fetched.completed);
    assert_eq!(fetched.bucket, Bucket::Today);
    assert_eq!(fetched.list, None);
    assert_eq!(fetched.start_date, None);
    assert_eq!(fetched.expected_completion, None);
}

#[tokio::test]
async fn create_trims_title_and_description() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);

    let created = service
        .create(NewTask {
            title: Some("  Buy milk  ".to_string()),
            description: Some("  2 liters ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, "2 liters");
}

#[tokio::test]
async fn cannot_create_task_without_a_title() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);

    for title in [None, Some("".to_string()), Some("   ".to_string())] {
        let err = service
            .create(NewTask {
                title,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::InvalidInput(_)));
    }
}

#[tokio::test]
async fn cannot_create_task_with_unknown_bucket() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);

    let err = service
        .create(NewTask {
            title: Some("x".to_string()),
            bucket: Some("someday".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::InvalidInput(_)));
}

#[tokio::test]
async fn unparsable_date_strings_are_treated_as_absent() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);

    let created = service
        .create(NewTask {
            title: Some("x".to_string()),
            start_date: Some("next tuesday".to_string()),
            expected_completion: Some("2025-02-01".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.start_date, None);
    assert!(created.expected_completion.is_some());
}

#[tokio::test]
async fn update_applies_only_supplied_fields() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);
    let created = service.create(new_task("original")).await.unwrap();

    let updated = service
        .update(
            created.id,
            TaskPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.completed);
    assert_eq!(updated.title, "original");
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_can_clear_the_list_with_null() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);
    let created = service
        .create(NewTask {
            title: Some("x".to_string()),
            list: Some("Work".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.list.as_deref(), Some("Work"));

    let updated = service
        .update(
            created.id,
            TaskPatch {
                list: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.list, None);
}

#[tokio::test]
async fn update_rejects_blank_title() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);
    let created = service.create(new_task("x")).await.unwrap();

    let err = service
        .update(
            created.id,
            TaskPatch {
                title: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::InvalidInput(_)));
}

#[tokio::test]
async fn update_with_unparsable_date_leaves_field_absent() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);
    let created = service
        .create(NewTask {
            title: Some("x".to_string()),
            start_date: Some("2025-03-01T09:00:00Z".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(created.start_date.is_some());

    let updated = service
        .update(
            created.id,
            TaskPatch {
                start_date: Some(Some("whenever".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.start_date, None);
}

#[tokio::test]
async fn cannot_update_missing_task() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);

    let err = service
        .update(
            999,
            TaskPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::NotFound));
}

#[tokio::test]
async fn deleted_task_disappears_from_grouped_results() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);
    let keep = service.create(new_task("keep")).await.unwrap();
    let doomed = service.create(new_task("doomed")).await.unwrap();

    service.delete(doomed.id).await.unwrap();

    let grouped = service.get_grouped().await.unwrap();
    let ids: Vec<_> = grouped.today.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![keep.id]);

    let err = service.get_by_id(doomed.id).await.unwrap_err();
    assert!(matches!(err, TaskError::NotFound));
    let err = service.delete(doomed.id).await.unwrap_err();
    assert!(matches!(err, TaskError::NotFound));
}

#[tokio::test]
async fn grouped_results_partition_by_bucket_newest_first() {
    let db = common::setup_db().await.unwrap();
    let service = TaskService::new(&db);
    let first = service
        .create(NewTask {
            title: Some("a".to_string()),
            bucket: Some("today".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let second = service
        .create(NewTask {
            title: Some("b".to_string()),
            bucket: Some("today".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    service
        .create(NewTask {
            title: Some("c".to_string()),
            bucket: Some("week".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let grouped = service.get_grouped().await.unwrap();

    let today_ids: Vec<_> = grouped.today.iter().map(|t| t.id).collect();
    assert_eq!(today_ids, vec![second.id, first.id]);
    assert!(grouped.tomorrow.is_empty());
    assert_eq!(grouped.week.len(), 1);
}
