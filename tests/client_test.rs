mod common;

use std::sync::Arc;

use reqwest::StatusCode;
use yeram::{
    client::{ClientError, SiteClient},
    domain::GalleryCategory,
    repository::{MemoryStore, Repositories},
    service::ServiceContext,
};

use common::{announcement, build_app, photo, test_settings, weekly_service, ADMIN_PASSWORD};

struct TestServer {
    client: SiteClient,
    context: Arc<ServiceContext>,
    _uploads: tempfile::TempDir,
}

async fn spawn_server() -> anyhow::Result<TestServer> {
    let uploads = tempfile::tempdir()?;
    let (app, context) = build_app(
        Repositories::memory(MemoryStore::new()),
        test_settings(uploads.path()),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(TestServer {
        client: SiteClient::new(format!("http://{}/", addr)),
        context,
        _uploads: uploads,
    })
}

#[tokio::test]
async fn reads_are_served_from_cache_until_a_mutation() -> anyhow::Result<()> {
    let server = spawn_server().await?;
    let client = &server.client;

    assert!(client.announcements().await?.is_empty());
    assert_eq!(client.cache().len().await, 1);

    // Written behind the client's back, so the cached listing is stale.
    server.context.announcement_repo.create(announcement("Bypass")).await?;
    assert!(client.announcements().await?.is_empty());

    client.login(ADMIN_PASSWORD).await?;
    client.create_announcement(&announcement("Through client")).await?;

    let titles: Vec<String> = client
        .announcements()
        .await?
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["Through client".to_string(), "Bypass".to_string()]);
    Ok(())
}

#[tokio::test]
async fn mutations_only_invalidate_their_own_resource() -> anyhow::Result<()> {
    let server = spawn_server().await?;
    let client = &server.client;
    client.login(ADMIN_PASSWORD).await?;

    client.weekly_services().await?;
    client.gallery(None).await?;
    client.gallery(Some(GalleryCategory::Youth)).await?;
    assert_eq!(client.cache().len().await, 3);

    let added = client.add_gallery_photo(&photo("retreat", GalleryCategory::Youth)).await?;
    assert_eq!(client.cache().len().await, 1);

    let youth = client.gallery(Some(GalleryCategory::Youth)).await?;
    assert_eq!(youth.iter().map(|p| p.id).collect::<Vec<_>>(), vec![added.id]);
    assert!(client.gallery(Some(GalleryCategory::Worship)).await?.is_empty());

    client.delete_gallery_photo(added.id).await?;
    assert!(client.gallery(None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn weekly_service_round_trip_through_the_client() -> anyhow::Result<()> {
    let server = spawn_server().await?;
    let client = &server.client;
    client.login(ADMIN_PASSWORD).await?;

    assert!(client.current_weekly_service().await?.is_none());

    let created = client.create_weekly_service(&weekly_service("Pentecost")).await?;
    let current = client.current_weekly_service().await?.unwrap();
    assert_eq!(current, created);

    let mut revised = weekly_service("Pentecost");
    revised.scripture = "Acts 2:1-21".to_string();
    let updated = client.update_weekly_service(created.id, &revised).await?;
    assert_eq!(updated.scripture, "Acts 2:1-21");
    assert_eq!(client.current_weekly_service().await?.unwrap().scripture, "Acts 2:1-21");

    client.delete_weekly_service(created.id).await?;
    assert!(client.weekly_services().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn api_errors_surface_status_and_message() -> anyhow::Result<()> {
    let server = spawn_server().await?;
    let client = &server.client;

    let err = client.login("not the password").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(!client.is_logged_in().await);

    let err = client.create_announcement(&announcement("Nope")).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status, .. } if status == StatusCode::UNAUTHORIZED));

    client.login(ADMIN_PASSWORD).await?;
    let err = client.delete_announcement(404).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error: {}", other),
    }

    client.logout().await?;
    assert!(!client.is_logged_in().await);
    Ok(())
}

#[tokio::test]
async fn upload_returns_a_servable_url() -> anyhow::Result<()> {
    let server = spawn_server().await?;
    let client = &server.client;
    client.login(ADMIN_PASSWORD).await?;

    let url = client
        .upload_image("sunrise.webp", "image/webp", b"webp-bytes".to_vec())
        .await?;
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".webp"));
    Ok(())
}
