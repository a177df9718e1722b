use validator::Validate;

use crate::entities::contact::ContactForm;
use crate::errors::AppError;
use crate::infrastructure::email::mailer::Mailer;

pub struct ContactHandler<M>
where
    M: Mailer,
{
    pub mailer: M,
    pub recipient: String,
}

impl<M> ContactHandler<M>
where
    M: Mailer,
{
    pub fn new(mailer: M, recipient: String) -> Self {
        ContactHandler { mailer, recipient }
    }

    /// Forwards a contact-form submission to the company inbox.
    pub async fn submit(&self, form: ContactForm) -> Result<String, AppError> {
        form.validate()?;

        let subject = format!("Yeni İletişim Formu Mesajı - {}", form.name);

        let mut body = format!(
            "Yeni bir iletişim formu mesajı alındı.\n\n\
             Ad Soyad: {}\n\
             E-posta: {}\n\
             Telefon: {}\n",
            form.name, form.email, form.phone
        );
        if let Some(label) = form.project_type_label() {
            body.push_str(&format!("Proje Tipi: {}\n", label));
        }
        body.push_str(&format!("\nMesaj:\n{}\n", form.message));

        self.mailer
            .send(&self.recipient, &subject, body)
            .await
            .map_err(|e| AppError::Internal(format!("contact mail failed: {}", e)))?;

        tracing::info!(sender = %form.email, "contact form forwarded");
        Ok("Mesajınız başarıyla gönderildi. En kısa sürede size dönüş yapacağız.".to_string())
    }
}
