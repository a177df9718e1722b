use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[validate(length(min = 1, message = "Tüm zorunlu alanları doldurun"))]
    pub name: String,
    #[validate(email(message = "Geçerli bir email adresi girin"))]
    pub email: String,
    #[validate(length(min = 1, message = "Tüm zorunlu alanları doldurun"))]
    pub phone: String,
    pub project_type: Option<String>,
    #[validate(length(min = 1, message = "Tüm zorunlu alanları doldurun"))]
    pub message: String,
}

impl ContactForm {
    /// Human-readable label for the optional project-type select value.
    pub fn project_type_label(&self) -> Option<&str> {
        self.project_type.as_deref().map(|t| match t {
            "konut" => "Konut Projesi",
            "ofis" => "Ofis Binası",
            "ticari" => "Ticari Bina",
            "sanayi" => "Sanayi Tesisi",
            "diger" => "Diğer",
            other => other,
        })
    }
}
