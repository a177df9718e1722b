use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use construction_backend::{
    entities::spec_category::{NewSpecCategoryRequest, SpecCategory, UpdateSpecCategoryRequest},
    errors::AppError,
    use_cases::specs::SpecCategoryHandler,
};

mock! {
    pub SpecRepo {}

    #[async_trait]
    impl construction_backend::repositories::spec_category::SpecCategoryRepository for SpecRepo {
        async fn list_active(&self) -> Result<Vec<SpecCategory>, AppError>;
        async fn find_active_by_slug(&self, slug: &str) -> Result<Option<SpecCategory>, AppError>;
        async fn find_by_id(&self, id: &Uuid) -> Result<Option<SpecCategory>, AppError>;
        async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError>;
        async fn create(
            &self,
            title: &str,
            slug: &str,
            content: &str,
            updated_by: Option<String>,
        ) -> Result<SpecCategory, AppError>;
        async fn update(
            &self,
            id: &Uuid,
            title_and_slug: Option<(String, String)>,
            content: Option<String>,
            updated_by: Option<String>,
            is_active: Option<bool>,
            sort_order: Option<i32>,
        ) -> Result<Option<SpecCategory>, AppError>;
        async fn delete(&self, id: &Uuid) -> Result<bool, AppError>;
    }
}

fn stored_category(id: Uuid, title: &str, slug: &str) -> SpecCategory {
    SpecCategory {
        id,
        title: title.to_string(),
        slug: slug.to_string(),
        content: "<p>içerik</p>".to_string(),
        is_active: true,
        sort_order: 0,
        last_updated: Utc::now(),
        updated_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn create_derives_a_transliterated_slug_from_the_title() {
    let mut repo = MockSpecRepo::new();
    repo.expect_slug_exists()
        .withf(|slug, _| slug == "yalitim-ve-isi-sartlari")
        .returning(|_, _| Ok(false));
    repo.expect_create()
        .withf(|title, slug, _, _| {
            title == "Yalıtım ve Isı Şartları" && slug == "yalitim-ve-isi-sartlari"
        })
        .returning(|title, slug, _, _| Ok(stored_category(Uuid::new_v4(), title, slug)));

    let handler = SpecCategoryHandler::new(repo);

    let created = handler
        .create(NewSpecCategoryRequest {
            title: " Yalıtım ve Isı Şartları ".to_string(),
            content: "<p>içerik</p>".to_string(),
            updated_by: None,
        })
        .await
        .unwrap();

    assert_eq!(created.slug, "yalitim-ve-isi-sartlari");
}

#[tokio::test]
async fn create_with_a_duplicate_title_conflicts() {
    let mut repo = MockSpecRepo::new();
    repo.expect_slug_exists().returning(|_, _| Ok(true));

    let handler = SpecCategoryHandler::new(repo);

    let err = handler
        .create(NewSpecCategoryRequest {
            title: "Genel Şartlar".to_string(),
            content: String::new(),
            updated_by: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn renaming_rederives_the_slug_and_excludes_self_from_the_check() {
    let id = Uuid::new_v4();

    let mut repo = MockSpecRepo::new();
    repo.expect_slug_exists()
        .withf(move |slug, exclude| slug == "celik-konstruksiyon" && *exclude == Some(id))
        .returning(|_, _| Ok(false));
    repo.expect_update()
        .withf(|_, title_and_slug, _, _, _, _| {
            matches!(
                title_and_slug,
                Some((title, slug))
                    if title == "Çelik Konstrüksiyon" && slug == "celik-konstruksiyon"
            )
        })
        .returning(move |id, _, _, _, _, _| {
            Ok(Some(stored_category(
                *id,
                "Çelik Konstrüksiyon",
                "celik-konstruksiyon",
            )))
        });

    let handler = SpecCategoryHandler::new(repo);

    let updated = handler
        .update(UpdateSpecCategoryRequest {
            id,
            title: Some("Çelik Konstrüksiyon".to_string()),
            content: None,
            updated_by: None,
            is_active: None,
            sort_order: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.slug, "celik-konstruksiyon");
}

#[tokio::test]
async fn update_without_a_title_leaves_the_slug_alone() {
    let id = Uuid::new_v4();

    let mut repo = MockSpecRepo::new();
    repo.expect_update()
        .withf(|_, title_and_slug, content, _, _, _| {
            title_and_slug.is_none() && content.as_deref() == Some("<p>yeni</p>")
        })
        .returning(move |id, _, _, _, _, _| {
            Ok(Some(stored_category(*id, "Genel Şartlar", "genel-sartlar")))
        });

    let handler = SpecCategoryHandler::new(repo);

    handler
        .update(UpdateSpecCategoryRequest {
            id,
            title: None,
            content: Some("<p>yeni</p>".to_string()),
            updated_by: None,
            is_active: None,
            sort_order: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn missing_category_is_a_404() {
    let mut repo = MockSpecRepo::new();
    repo.expect_find_active_by_slug().returning(|_| Ok(None));

    let handler = SpecCategoryHandler::new(repo);

    let err = handler.get_by_slug("yok-boyle-bir-sey").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
