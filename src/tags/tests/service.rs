mod create_tag_tests {
    use crate::model::error::tag_errors::CreateTagError;
    use crate::model::request::tag_requests::CreateTagRequest;
    use crate::tags::service::{create_tag, get_tag};
    use crate::test::*;

    #[test]
    fn create_tag_generates_id() {
        refresh_db();
        let tag = create_tag(CreateTagRequest {
            name: "  rust ".to_string(),
            color: Some("#dea584".to_string()),
            aliases: vec!["rustlang ".to_string(), "crab".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert!(uuid::Uuid::parse_str(&tag.id).is_ok());
        assert_eq!("rust", tag.name);
        assert_eq!(vec!["rustlang", "crab"], tag.aliases);
        assert_eq!(tag, get_tag(&tag.id).unwrap());
        cleanup();
    }

    #[test]
    fn create_tag_with_id() {
        refresh_db();
        let tag = create_tag(CreateTagRequest {
            id: Some("rust".to_string()),
            name: "Rust".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!("rust", tag.id);
        let res = create_tag(CreateTagRequest {
            id: Some("rust".to_string()),
            name: "Something else".to_string(),
            ..Default::default()
        });
        assert_eq!(Err(CreateTagError::AlreadyExists), res);
        cleanup();
    }

    #[test]
    fn create_tag_name_taken() {
        refresh_db();
        create_tag_db_entry("rust");
        let res = create_tag(CreateTagRequest {
            name: "RUST".to_string(),
            ..Default::default()
        });
        assert_eq!(Err(CreateTagError::AlreadyExists), res);
        cleanup();
    }

    #[test]
    fn create_tag_validation() {
        refresh_db();
        let blank_name = create_tag(CreateTagRequest {
            name: "  ".to_string(),
            ..Default::default()
        });
        let bad_color = create_tag(CreateTagRequest {
            name: "test".to_string(),
            color: Some("red".to_string()),
            ..Default::default()
        });
        let blank_alias = create_tag(CreateTagRequest {
            name: "test".to_string(),
            aliases: vec![" ".to_string()],
            ..Default::default()
        });
        assert!(matches!(blank_name, Err(CreateTagError::Validation(_))));
        assert!(matches!(bad_color, Err(CreateTagError::Validation(_))));
        assert!(matches!(blank_alias, Err(CreateTagError::Validation(_))));
        cleanup();
    }

    #[test]
    fn create_tag_missing_parent() {
        refresh_db();
        let res = create_tag(CreateTagRequest {
            name: "child".to_string(),
            parent_ids: ["missing".to_string()].into(),
            ..Default::default()
        });
        assert_eq!(
            Err(CreateTagError::ParentNotFound("missing".to_string())),
            res
        );
        cleanup();
    }

    #[test]
    fn create_tag_with_parent() {
        refresh_db();
        let parent = create_tag_db_entry("parent");
        let child = create_child_tag_db_entry("child", &parent.id);
        assert!(child.parent_ids.contains(&parent.id));
        assert_eq!(child, get_tag(&child.id).unwrap());
        cleanup();
    }
}

mod get_tag_tests {
    use crate::model::error::tag_errors::GetTagError;
    use crate::model::request::tag_requests::CreateTagRequest;
    use crate::tags::service::{create_tag, find_tag, get_all_tags, get_tag};
    use crate::test::*;

    #[test]
    fn get_tag_non_existent() {
        refresh_db();
        let res = get_tag("missing").expect_err("Retrieving a nonexistent tag should return an error");
        assert_eq!(GetTagError::TagNotFound, res);
        cleanup();
    }

    #[test]
    fn get_all_tags_sorted_by_name() {
        refresh_db();
        let b = create_tag_db_entry("banana");
        let a = create_tag_db_entry("Apple");
        let c = create_tag_db_entry("cherry");
        assert_eq!(vec![a, b, c], get_all_tags().unwrap());
        cleanup();
    }

    #[test]
    fn find_tag_prefers_name() {
        refresh_db();
        let by_name = create_tag_db_entry("js");
        create_tag(CreateTagRequest {
            name: "javascript".to_string(),
            aliases: vec!["js".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(by_name, find_tag("JS").unwrap());
        cleanup();
    }

    #[test]
    fn find_tag_by_alias() {
        refresh_db();
        let tag = create_tag(CreateTagRequest {
            name: "javascript".to_string(),
            aliases: vec!["ECMAScript".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(tag, find_tag("ecmascript").unwrap());
        assert_eq!(Err(GetTagError::TagNotFound), find_tag("typescript"));
        cleanup();
    }
}

mod update_tag_tests {
    use crate::model::error::tag_errors::UpdateTagError;
    use crate::model::request::tag_requests::{CreateTagRequest, UpdateTagRequest};
    use crate::tags::service::{create_tag, get_tag, update_tag};
    use crate::test::*;

    #[test]
    fn update_tag_works() {
        refresh_db();
        let tag = create_tag_db_entry("test_tag");
        let updated = update_tag(
            &tag.id,
            UpdateTagRequest {
                name: Some("new_name".to_string()),
                color: Some(Some("#abc".to_string())),
                aliases: Some(vec!["alias".to_string()]),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!("new_name", updated.name);
        assert_eq!(Some("#abc".to_string()), updated.color);
        assert_eq!(vec!["alias"], updated.aliases);
        // test that it's in the database
        assert_eq!(updated, get_tag(&tag.id).unwrap());
        cleanup();
    }

    #[test]
    fn update_tag_leaves_missing_fields_alone() {
        refresh_db();
        let tag = create_tag(CreateTagRequest {
            name: "test".to_string(),
            color: Some("#fff".to_string()),
            aliases: vec!["alias".to_string()],
            ..Default::default()
        })
        .unwrap();
        let updated = update_tag(&tag.id, UpdateTagRequest::default()).unwrap();
        assert_eq!(tag, updated);
        cleanup();
    }

    #[test]
    fn update_tag_clears_color() {
        refresh_db();
        let tag = create_tag(CreateTagRequest {
            name: "test".to_string(),
            color: Some("#fff".to_string()),
            ..Default::default()
        })
        .unwrap();
        let updated = update_tag(
            &tag.id,
            UpdateTagRequest {
                color: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(None, updated.color);
        cleanup();
    }

    #[test]
    fn update_tag_not_found() {
        refresh_db();
        let res = update_tag("missing", UpdateTagRequest::default());
        assert_eq!(UpdateTagError::TagNotFound, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn update_tag_already_exists() {
        refresh_db();
        create_tag_db_entry("first");
        let second = create_tag_db_entry("second");
        let res = update_tag(
            &second.id,
            UpdateTagRequest {
                name: Some("FIRST".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(UpdateTagError::NewNameAlreadyExists, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn update_tag_change_case_of_own_name() {
        refresh_db();
        let tag = create_tag_db_entry("rust");
        let updated = update_tag(
            &tag.id,
            UpdateTagRequest {
                name: Some("Rust".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!("Rust", updated.name);
        cleanup();
    }

    #[test]
    fn update_tag_rejects_self_as_parent() {
        refresh_db();
        let tag = create_tag_db_entry("test");
        let res = update_tag(
            &tag.id,
            UpdateTagRequest {
                parent_ids: Some([tag.id.clone()].into()),
                ..Default::default()
            },
        );
        assert_eq!(UpdateTagError::CycleDetected(tag.id.clone()), res.unwrap_err());
        cleanup();
    }

    #[test]
    fn update_tag_rejects_descendant_as_parent() {
        refresh_db();
        let root = create_tag_db_entry("root");
        let child = create_child_tag_db_entry("child", &root.id);
        let grandchild = create_child_tag_db_entry("grandchild", &child.id);
        let res = update_tag(
            &root.id,
            UpdateTagRequest {
                parent_ids: Some([grandchild.id.clone()].into()),
                ..Default::default()
            },
        );
        assert_eq!(UpdateTagError::CycleDetected(grandchild.id), res.unwrap_err());
        // nothing was saved
        assert!(get_tag(&root.id).unwrap().parent_ids.is_empty());
        cleanup();
    }

    #[test]
    fn update_tag_missing_parent() {
        refresh_db();
        let tag = create_tag_db_entry("test");
        let res = update_tag(
            &tag.id,
            UpdateTagRequest {
                parent_ids: Some(["missing".to_string()].into()),
                ..Default::default()
            },
        );
        assert_eq!(
            UpdateTagError::ParentNotFound("missing".to_string()),
            res.unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn update_tag_replaces_parents() {
        refresh_db();
        let first = create_tag_db_entry("first");
        let second = create_tag_db_entry("second");
        let child = create_child_tag_db_entry("child", &first.id);
        let updated = update_tag(
            &child.id,
            UpdateTagRequest {
                parent_ids: Some([second.id.clone()].into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(1, updated.parent_ids.len());
        assert!(updated.parent_ids.contains(&second.id));
        cleanup();
    }
}

mod delete_tag_tests {
    use crate::model::error::tag_errors::{DeleteTagError, GetTagError};
    use crate::resources::service::get_resource;
    use crate::tags::service::{delete_tag, get_tag};
    use crate::test::*;

    #[test]
    fn delete_tag_works() {
        refresh_db();
        let tag = create_tag_db_entry("test");
        delete_tag(&tag.id).unwrap();
        assert_eq!(Err(GetTagError::TagNotFound), get_tag(&tag.id));
        cleanup();
    }

    #[test]
    fn delete_tag_not_found() {
        refresh_db();
        assert_eq!(Err(DeleteTagError::TagNotFound), delete_tag("missing"));
        cleanup();
    }

    #[test]
    fn delete_tag_unlinks_children_and_resources() {
        refresh_db();
        let parent = create_tag_db_entry("parent");
        let child = create_child_tag_db_entry("child", &parent.id);
        let resource =
            create_resource_db_entry("web", "page", vec![parent.id.clone(), child.id.clone()]);
        delete_tag(&parent.id).unwrap();
        assert!(get_tag(&child.id).unwrap().parent_ids.is_empty());
        let resource = get_resource(&resource.id).unwrap();
        assert_eq!(vec![get_tag(&child.id).unwrap()], resource.tags);
        cleanup();
    }
}
