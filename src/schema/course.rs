use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x200?text=No+Image";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course{
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<CourseImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseImage{
    pub url: String,
}

impl Course {
    pub fn image_url(&self) -> &str {
        match &self.image {
            Some(image) => &image.url,
            None => PLACEHOLDER_IMAGE_URL,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CoursesResponse{
    pub courses: Vec<Course>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseResponse{
    #[serde(default)]
    pub message: Option<String>,
    pub course: Option<Course>,
}

// validated form contents, ready to encode as multipart
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: PathBuf,
}
