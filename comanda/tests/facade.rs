use comanda::{file::JsonFileStore, memory::InMemoryStore, prelude::*, serde_json::json};

#[tokio::test]
async fn boxed_backends_share_one_store_type() {
    let dir = tempfile::TempDir::new().unwrap();
    let file_backend = JsonFileStore::builder().data_dir(dir.path()).build().await.unwrap();

    let backends: Vec<Box<dyn DynStoreBackend>> =
        vec![Box::new(InMemoryStore::new()), Box::new(file_backend)];

    for backend in backends {
        let store = DocumentStore::new(backend);
        let created = store.create("users", json!({ "name": "Ana" })).await.unwrap();
        assert_eq!(created["id"], 1);
        assert_eq!(store.get("users", "1").await.unwrap(), created);
        store.shutdown().await.unwrap();
    }
}

#[tokio::test]
async fn prelude_covers_a_custom_schema() {
    let schema = Schema::new().collection("tables").singleton("settings");
    let store = DocumentStore::with_schema(InMemoryStore::new(), schema);

    assert_eq!(store.list("tables").await.unwrap(), json!([]));
    let err = store.list("users").await.unwrap_err();
    assert!(matches!(err, DocumentStoreError::ResourceNotFound(_)));

    let settings: Resource<'_, InMemoryStore> = store.resource("settings");
    assert_eq!(settings.update("", json!({ "tax": 16 })).await.unwrap(), json!({ "tax": 16 }));
    assert_eq!(store.schema().resolve("settings").unwrap().kind(), ResourceKind::Singleton);
}
