use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    Completed,
    Ongoing,
}

impl ProjectStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "COMPLETED" => Some(ProjectStatus::Completed),
            "ONGOING" => Some(ProjectStatus::Ongoing),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub location: String,
    pub status: ProjectStatus,
    /// Ordered list of image URLs, 1–20 entries.
    pub images: Vec<String>,
    pub apartment_info: Option<String>,
    pub duplex_info: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Optimistic-concurrency counter, bumped on every update.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated scalar fields shared by create and update.
#[derive(Debug, Clone)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: ProjectStatus,
    pub apartment_info: Option<String>,
    pub duplex_info: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct ProjectInsert {
    pub fields: ProjectFields,
    pub slug: String,
    pub images: Vec<String>,
}

/// An image file received through the multipart form, already read into
/// memory (uploads are capped at 5MB apiece).
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: i64,
    pub has_more: bool,
    pub items_per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32, total_items: i64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            ((total_items as f64) / (per_page as f64)).ceil() as u32
        };

        Pagination {
            current_page: page,
            total_pages,
            total_items,
            has_more: (page as i64) * (per_page as i64) < total_items,
            items_per_page: per_page,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    pub pagination: Pagination,
}

/// Homepage payload: up to six most recent projects per status, each
/// trimmed down to its first image.
#[derive(Debug, Serialize)]
pub struct HomepageProjects {
    pub completed: Vec<Project>,
    pub ongoing: Vec<Project>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: i64,
    pub completed_projects: i64,
    pub ongoing_projects: i64,
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn has_more_iff_page_times_limit_below_total() {
        assert!(Pagination::new(1, 12, 13).has_more);
        assert!(!Pagination::new(2, 12, 13).has_more);
        assert!(!Pagination::new(1, 12, 12).has_more);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 12, 13).total_pages, 2);
        assert_eq!(Pagination::new(1, 12, 24).total_pages, 2);
        assert_eq!(Pagination::new(1, 12, 0).total_pages, 0);
    }

    #[test]
    fn page_beyond_range_reports_no_more() {
        let p = Pagination::new(9, 12, 13);
        assert!(!p.has_more);
        assert_eq!(p.current_page, 9);
    }
}
