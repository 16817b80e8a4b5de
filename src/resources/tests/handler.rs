use rocket::http::{Header, Status};
use rocket::local::blocking::Client;

use crate::model::{Resource, ResourceStatus};
use crate::rocket;
use crate::test::*;

fn client() -> Client {
    Client::tracked(rocket()).unwrap()
}

fn set_password() {
    refresh_db();
    let client = client();
    let uri = uri!("/api/password");
    client
        .post(uri)
        .body(r#"{"username":"username","password":"password"}"#)
        .dispatch();
}

fn auth() -> Header<'static> {
    Header::new("Authorization", AUTH)
}

#[test]
fn get_resource_without_creds() {
    set_password();
    let client = client();
    let res = client.get(uri!("/resources/1")).dispatch();
    assert_eq!(res.status(), Status::Unauthorized);
    cleanup();
}

#[test]
fn get_resource_success() {
    set_password();
    let tag = create_tag_db_entry("tag");
    let resource = create_resource_db_entry("web", "title", vec![tag.id]);
    let client = client();
    let res = client
        .get(format!("/resources/{}", resource.id))
        .header(auth())
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(Some(resource), res.into_json::<Resource>());
    cleanup();
}

#[test]
fn get_resource_not_found() {
    set_password();
    let client = client();
    let res = client
        .get(uri!("/resources/missing"))
        .header(auth())
        .dispatch();
    assert_eq!(res.status(), Status::NotFound);
    cleanup();
}

#[test]
fn create_resource_success() {
    set_password();
    let tag = create_tag_db_entry("tag");
    let client = client();
    let res = client
        .post(uri!("/resources"))
        .header(auth())
        .body(format!(
            r#"{{"source":"web","externalId":"42","title":"Home","createdAt":"2024-03-01T10:00:00+02:00","tagIds":["{}"]}}"#,
            tag.id
        ))
        .dispatch();
    assert_eq!(res.status(), Status::Created);
    let resource = res.into_json::<Resource>().unwrap();
    assert_eq!(Some("42".to_string()), resource.external_id);
    // offsets are normalized to utc
    assert_eq!(
        "2024-03-01T08:00:00Z",
        resource
            .created_at
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    );
    assert_eq!(vec![tag], resource.tags);
    cleanup();
}

#[test]
fn create_resource_missing_tag() {
    set_password();
    let client = client();
    let res = client
        .post(uri!("/resources"))
        .header(auth())
        .body(r#"{"source":"web","title":"Home","tagIds":["missing"]}"#)
        .dispatch();
    assert_eq!(res.status(), Status::NotFound);
    cleanup();
}

#[test]
fn create_resource_duplicate_external_id() {
    set_password();
    let client = client();
    let body = r#"{"source":"web","externalId":"42","title":"Home"}"#;
    let first = client
        .post(uri!("/resources"))
        .header(auth())
        .body(body)
        .dispatch();
    assert_eq!(first.status(), Status::Created);
    let second = client
        .post(uri!("/resources"))
        .header(auth())
        .body(body)
        .dispatch();
    assert_eq!(second.status(), Status::BadRequest);
    cleanup();
}

#[test]
fn lookup_resource() {
    set_password();
    let client = client();
    client
        .post(uri!("/resources/index"))
        .header(auth())
        .body(r#"{"source":"web","externalId":"42","title":"Home"}"#)
        .dispatch();
    let found = client
        .get("/resources/lookup?source=web&external_id=42")
        .header(auth())
        .dispatch();
    assert_eq!(found.status(), Status::Ok);
    assert_eq!("Home", found.into_json::<Resource>().unwrap().title);
    let missing = client
        .get("/resources/lookup?source=rss&external_id=42")
        .header(auth())
        .dispatch();
    assert_eq!(missing.status(), Status::NotFound);
    cleanup();
}

#[test]
fn index_resource_twice() {
    set_password();
    let client = client();
    let first = client
        .post(uri!("/resources/index"))
        .header(auth())
        .body(r#"{"source":"web","externalId":"42","title":"first"}"#)
        .dispatch();
    assert_eq!(first.status(), Status::Ok);
    let first = first.into_json::<Resource>().unwrap();
    let second = client
        .post(uri!("/resources/index"))
        .header(auth())
        .body(r#"{"source":"web","externalId":"42","title":"second"}"#)
        .dispatch()
        .into_json::<Resource>()
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!("second", second.title);
    cleanup();
}

#[test]
fn search_resources_by_status() {
    set_password();
    let active = create_resource_db_entry("web", "active", vec![]);
    let stale = create_resource_db_entry("web", "stale", vec![]);
    let client = client();
    client
        .post(format!("/resources/{}/stale", stale.id))
        .header(auth())
        .dispatch();
    let res = client
        .get("/resources?status=active")
        .header(auth())
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(Some(vec![active]), res.into_json::<Vec<Resource>>());
    cleanup();
}

#[test]
fn search_resources_invalid_status() {
    set_password();
    let client = client();
    let res = client
        .get("/resources?status=archived")
        .header(auth())
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
    cleanup();
}

#[test]
fn search_resources_missing_tag() {
    set_password();
    let client = client();
    let res = client
        .get("/resources?tag=missing")
        .header(auth())
        .dispatch();
    assert_eq!(res.status(), Status::NotFound);
    cleanup();
}

#[test]
fn search_resources_by_parent_tag() {
    set_password();
    let parent = create_tag_db_entry("parent");
    let child = create_child_tag_db_entry("child", &parent.id);
    let resource = create_resource_db_entry("web", "title", vec![child.id]);
    create_resource_db_entry("web", "untagged", vec![]);
    let client = client();
    let res = client
        .get(format!("/resources?tag={}", parent.id))
        .header(auth())
        .dispatch();
    assert_eq!(Some(vec![resource]), res.into_json::<Vec<Resource>>());
    cleanup();
}

#[test]
fn update_resource_clears_description() {
    set_password();
    let client = client();
    let created = client
        .post(uri!("/resources"))
        .header(auth())
        .body(r#"{"source":"web","title":"Home","description":"text","url":"https://example.com"}"#)
        .dispatch()
        .into_json::<Resource>()
        .unwrap();
    let res = client
        .put(format!("/resources/{}", created.id))
        .header(auth())
        .body(r#"{"description":null}"#)
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let updated = res.into_json::<Resource>().unwrap();
    assert_eq!(None, updated.description);
    assert_eq!(Some("https://example.com".to_string()), updated.url);
    cleanup();
}

#[test]
fn update_resource_not_found() {
    set_password();
    let client = client();
    let res = client
        .put(uri!("/resources/missing"))
        .header(auth())
        .body(r#"{"title":"new"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::NotFound);
    cleanup();
}

#[test]
fn set_status_works() {
    set_password();
    let resource = create_resource_db_entry("web", "title", vec![]);
    let client = client();
    let res = client
        .put(format!("/resources/{}/status", resource.id))
        .header(auth())
        .body(r#"{"status":"stale"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(
        ResourceStatus::Stale,
        res.into_json::<Resource>().unwrap().status
    );
    cleanup();
}

#[test]
fn set_status_unknown_value() {
    set_password();
    let resource = create_resource_db_entry("web", "title", vec![]);
    let client = client();
    let res = client
        .put(format!("/resources/{}/status", resource.id))
        .header(auth())
        .body(r#"{"status":"archived"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
    let res = client
        .put(format!("/resources/{}/status", resource.id))
        .header(auth())
        .body("not json")
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
    cleanup();
}

#[test]
fn mark_tombstone_stale() {
    set_password();
    let resource = create_resource_db_entry("web", "title", vec![]);
    let client = client();
    let deleted = client
        .delete(format!("/resources/{}", resource.id))
        .header(auth())
        .dispatch();
    assert_eq!(deleted.status(), Status::NoContent);
    let res = client
        .post(format!("/resources/{}/stale", resource.id))
        .header(auth())
        .dispatch();
    assert_eq!(res.status(), Status::Conflict);
    let restored = client
        .post(format!("/resources/{}/restore", resource.id))
        .header(auth())
        .dispatch();
    assert_eq!(restored.status(), Status::Ok);
    assert_eq!(
        ResourceStatus::Active,
        restored.into_json::<Resource>().unwrap().status
    );
    cleanup();
}

#[test]
fn delete_resource_not_found() {
    set_password();
    let client = client();
    let res = client
        .delete(uri!("/resources/missing"))
        .header(auth())
        .dispatch();
    assert_eq!(res.status(), Status::NotFound);
    cleanup();
}
