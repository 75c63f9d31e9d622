use shelter_ffi::api::{init_store, list_animals};

#[test]
fn first_launch_creates_nested_data_dir_and_seeds() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("app_support").join("shelter");
    assert!(!data_dir.exists());

    let init = init_store(data_dir.to_str().unwrap().to_string());
    assert!(init.ok, "{}", init.detail);
    assert!(init.seeded_now);
    assert!(data_dir.join("animals.db").exists());
    assert!(data_dir.join("shelter_prefs.json").exists());

    let list = list_animals();
    assert!(list.ok, "{}", list.detail);
    assert_eq!(list.items.len(), 50);
}
