//! Email service for confirmations, notifications, and reminders.
//!
//! Uses SMTP via lettre for delivery with Askama HTML + plain-text
//! templates. Sending is always best-effort from the caller's point of
//! view: workflows log failures and never roll back against them.

use askama::Template;
use chrono::NaiveDate;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use mealtrain_core::Hub;

use crate::config::EmailConfig;
use crate::dates::format_long;
use crate::models::{CourierContact, MealSignup};

/// Confirmation sent to a provider right after signup.
#[derive(Debug)]
pub struct SignupConfirmation<'a> {
    pub to: &'a str,
    pub provider_name: &'a str,
    pub pickup_date: NaiveDate,
    pub hub: Hub,
    pub meal_description: &'a str,
    pub freezer_friendly: bool,
    pub cancellation_url: &'a str,
    pub couriers: &'a [CourierContact],
}

/// Notice sent to each courier when a meal is added to their route.
#[derive(Debug)]
pub struct CourierSignupNotice<'a> {
    pub to: &'a str,
    pub provider_name: &'a str,
    pub provider_phone: &'a str,
    pub meal_description: &'a str,
    pub freezer_friendly: bool,
    pub can_bring_to_salem: bool,
    pub note_to_courier: Option<&'a str>,
    pub pickup_date: NaiveDate,
    pub hub: Hub,
    pub total_meals: i64,
}

/// Notice sent to each courier when a meal is cancelled.
#[derive(Debug)]
pub struct CancellationNotice<'a> {
    pub to: &'a str,
    pub provider_name: &'a str,
    pub meal_description: &'a str,
    pub pickup_date: NaiveDate,
    pub hub: Hub,
    pub remaining_count: i64,
}

/// Confirmation sent to the provider after their cancellation.
#[derive(Debug)]
pub struct CancellationConfirmation<'a> {
    pub to: &'a str,
    pub provider_name: &'a str,
    pub meal_description: &'a str,
    pub pickup_date: NaiveDate,
    pub hub: Hub,
}

/// Day-before reminder sent to a provider.
#[derive(Debug)]
pub struct Reminder<'a> {
    pub to: &'a str,
    pub provider_name: &'a str,
    pub pickup_date: NaiveDate,
    pub hub: Hub,
    pub meal_description: &'a str,
    pub couriers: &'a [CourierContact],
}

/// Day-before pickup summary sent to a courier.
#[derive(Debug)]
pub struct CourierSummary<'a> {
    pub to: &'a str,
    pub pickup_date: NaiveDate,
    pub hub: Hub,
    pub meals: &'a [MealSignup],
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template)]
#[template(path = "email/signup_confirmation.html")]
struct SignupConfirmationHtml<'a> {
    name: &'a str,
    date: &'a str,
    location: &'a str,
    address_lines: Vec<&'a str>,
    note: Option<&'a str>,
    meal_description: &'a str,
    freezer_friendly: bool,
    cancellation_url: &'a str,
    couriers: &'a [CourierContact],
}

#[derive(Template)]
#[template(path = "email/signup_confirmation.txt")]
struct SignupConfirmationText<'a> {
    name: &'a str,
    date: &'a str,
    location: &'a str,
    full_address: &'a str,
    note: Option<&'a str>,
    meal_description: &'a str,
    freezer_friendly: bool,
    cancellation_url: &'a str,
    couriers: &'a [CourierContact],
}

#[derive(Template)]
#[template(path = "email/courier_signup_notice.html")]
struct CourierSignupNoticeHtml<'a> {
    provider_name: &'a str,
    provider_phone: &'a str,
    meal_description: &'a str,
    freezer_friendly: bool,
    can_bring_to_salem: bool,
    note_to_courier: Option<&'a str>,
    date: &'a str,
    location: &'a str,
    total_meals: i64,
}

#[derive(Template)]
#[template(path = "email/courier_signup_notice.txt")]
struct CourierSignupNoticeText<'a> {
    provider_name: &'a str,
    provider_phone: &'a str,
    meal_description: &'a str,
    freezer_friendly: bool,
    can_bring_to_salem: bool,
    note_to_courier: Option<&'a str>,
    date: &'a str,
    location: &'a str,
    total_meals: i64,
}

#[derive(Template)]
#[template(path = "email/cancellation_notice.html")]
struct CancellationNoticeHtml<'a> {
    provider_name: &'a str,
    meal_description: &'a str,
    date: &'a str,
    location: &'a str,
    remaining_count: i64,
}

#[derive(Template)]
#[template(path = "email/cancellation_notice.txt")]
struct CancellationNoticeText<'a> {
    provider_name: &'a str,
    meal_description: &'a str,
    date: &'a str,
    location: &'a str,
    remaining_count: i64,
}

#[derive(Template)]
#[template(path = "email/cancellation_confirmation.html")]
struct CancellationConfirmationHtml<'a> {
    name: &'a str,
    meal_description: &'a str,
    date: &'a str,
    location: &'a str,
}

#[derive(Template)]
#[template(path = "email/cancellation_confirmation.txt")]
struct CancellationConfirmationText<'a> {
    name: &'a str,
    meal_description: &'a str,
    date: &'a str,
    location: &'a str,
}

#[derive(Template)]
#[template(path = "email/reminder.html")]
struct ReminderHtml<'a> {
    name: &'a str,
    date: &'a str,
    location: &'a str,
    address_lines: Vec<&'a str>,
    note: Option<&'a str>,
    meal_description: &'a str,
    couriers: &'a [CourierContact],
}

#[derive(Template)]
#[template(path = "email/reminder.txt")]
struct ReminderText<'a> {
    name: &'a str,
    date: &'a str,
    location: &'a str,
    full_address: &'a str,
    note: Option<&'a str>,
    meal_description: &'a str,
    couriers: &'a [CourierContact],
}

#[derive(Template)]
#[template(path = "email/courier_summary.html")]
struct CourierSummaryHtml<'a> {
    location: &'a str,
    date: &'a str,
    meals: &'a [MealSignup],
}

#[derive(Template)]
#[template(path = "email/courier_summary.txt")]
struct CourierSummaryText<'a> {
    location: &'a str,
    date: &'a str,
    meals: &'a [MealSignup],
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send the post-signup confirmation to the provider.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn send_signup_confirmation(
        &self,
        msg: SignupConfirmation<'_>,
    ) -> Result<(), EmailError> {
        let date = format_long(msg.pickup_date);
        let info = msg.hub.info();

        let html = SignupConfirmationHtml {
            name: msg.provider_name,
            date: &date,
            location: msg.hub.as_str(),
            address_lines: info.full_address.split('\n').collect(),
            note: info.note,
            meal_description: msg.meal_description,
            freezer_friendly: msg.freezer_friendly,
            cancellation_url: msg.cancellation_url,
            couriers: msg.couriers,
        }
        .render()?;
        let text = SignupConfirmationText {
            name: msg.provider_name,
            date: &date,
            location: msg.hub.as_str(),
            full_address: info.full_address,
            note: info.note,
            meal_description: msg.meal_description,
            freezer_friendly: msg.freezer_friendly,
            cancellation_url: msg.cancellation_url,
            couriers: msg.couriers,
        }
        .render()?;

        self.send_multipart_email(
            msg.to,
            &format!("Meal Drop-off Confirmation - {date}"),
            &text,
            &html,
        )
        .await
    }

    /// Notify a courier about a new signup on their route.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn send_courier_signup_notice(
        &self,
        msg: CourierSignupNotice<'_>,
    ) -> Result<(), EmailError> {
        let date = format_long(msg.pickup_date);

        let html = CourierSignupNoticeHtml {
            provider_name: msg.provider_name,
            provider_phone: msg.provider_phone,
            meal_description: msg.meal_description,
            freezer_friendly: msg.freezer_friendly,
            can_bring_to_salem: msg.can_bring_to_salem,
            note_to_courier: msg.note_to_courier,
            date: &date,
            location: msg.hub.as_str(),
            total_meals: msg.total_meals,
        }
        .render()?;
        let text = CourierSignupNoticeText {
            provider_name: msg.provider_name,
            provider_phone: msg.provider_phone,
            meal_description: msg.meal_description,
            freezer_friendly: msg.freezer_friendly,
            can_bring_to_salem: msg.can_bring_to_salem,
            note_to_courier: msg.note_to_courier,
            date: &date,
            location: msg.hub.as_str(),
            total_meals: msg.total_meals,
        }
        .render()?;

        self.send_multipart_email(
            msg.to,
            &format!("New Meal Signup - {} - {date}", msg.hub),
            &text,
            &html,
        )
        .await
    }

    /// Notify a courier that a meal on their route was cancelled.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn send_cancellation_notice(
        &self,
        msg: CancellationNotice<'_>,
    ) -> Result<(), EmailError> {
        let date = format_long(msg.pickup_date);

        let html = CancellationNoticeHtml {
            provider_name: msg.provider_name,
            meal_description: msg.meal_description,
            date: &date,
            location: msg.hub.as_str(),
            remaining_count: msg.remaining_count,
        }
        .render()?;
        let text = CancellationNoticeText {
            provider_name: msg.provider_name,
            meal_description: msg.meal_description,
            date: &date,
            location: msg.hub.as_str(),
            remaining_count: msg.remaining_count,
        }
        .render()?;

        self.send_multipart_email(
            msg.to,
            &format!("Meal Cancellation - {} - {date}", msg.hub),
            &text,
            &html,
        )
        .await
    }

    /// Confirm a cancellation to the provider who requested it.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn send_cancellation_confirmation(
        &self,
        msg: CancellationConfirmation<'_>,
    ) -> Result<(), EmailError> {
        let date = format_long(msg.pickup_date);

        let html = CancellationConfirmationHtml {
            name: msg.provider_name,
            meal_description: msg.meal_description,
            date: &date,
            location: msg.hub.as_str(),
        }
        .render()?;
        let text = CancellationConfirmationText {
            name: msg.provider_name,
            meal_description: msg.meal_description,
            date: &date,
            location: msg.hub.as_str(),
        }
        .render()?;

        self.send_multipart_email(msg.to, "Meal Cancellation Confirmed", &text, &html)
            .await
    }

    /// Send a day-before reminder to a provider.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn send_reminder(&self, msg: Reminder<'_>) -> Result<(), EmailError> {
        let date = format_long(msg.pickup_date);
        let info = msg.hub.info();

        let html = ReminderHtml {
            name: msg.provider_name,
            date: &date,
            location: msg.hub.as_str(),
            address_lines: info.full_address.split('\n').collect(),
            note: info.note,
            meal_description: msg.meal_description,
            couriers: msg.couriers,
        }
        .render()?;
        let text = ReminderText {
            name: msg.provider_name,
            date: &date,
            location: msg.hub.as_str(),
            full_address: info.full_address,
            note: info.note,
            meal_description: msg.meal_description,
            couriers: msg.couriers,
        }
        .render()?;

        self.send_multipart_email(
            msg.to,
            &format!("Reminder: Meal Drop-off Tomorrow - {date}"),
            &text,
            &html,
        )
        .await
    }

    /// Send a day-before pickup summary to a courier.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or a template fails to render.
    pub async fn send_courier_summary(&self, msg: CourierSummary<'_>) -> Result<(), EmailError> {
        let date = format_long(msg.pickup_date);

        let html = CourierSummaryHtml {
            location: msg.hub.as_str(),
            date: &date,
            meals: msg.meals,
        }
        .render()?;
        let text = CourierSummaryText {
            location: msg.hub.as_str(),
            date: &date,
            meals: msg.meals,
        }
        .render()?;

        self.send_multipart_email(
            msg.to,
            &format!("Meal Pickup Summary - {} - {date}", msg.hub),
            &text,
            &html,
        )
        .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use mealtrain_core::{Email, MealSignupId, Phone, PickupLocationId};

    use super::*;

    fn sample_couriers() -> Vec<CourierContact> {
        vec![CourierContact {
            name: "Robin".to_string(),
            phone: Phone::parse("503-555-0199").unwrap(),
            email: Email::parse("robin@example.com").unwrap(),
        }]
    }

    #[test]
    fn test_confirmation_contains_cancellation_url_and_address() {
        let couriers = sample_couriers();
        let html = SignupConfirmationHtml {
            name: "Dana",
            date: "December 6, 2025",
            location: "Salem",
            address_lines: Hub::Salem.info().full_address.split('\n').collect(),
            note: None,
            meal_description: "Lentil soup",
            freezer_friendly: true,
            cancellation_url: "https://meals.example.org/cancel/abc",
            couriers: &couriers,
        }
        .render()
        .unwrap();

        assert!(html.contains("https://meals.example.org/cancel/abc"));
        assert!(html.contains("255 Capitol St NE"));
        assert!(html.contains("December 6, 2025"));
        assert!(html.contains("Dana"));
        assert!(html.contains("Robin"));
        assert!(html.contains("Yes")); // freezer friendly
    }

    #[test]
    fn test_confirmation_renders_hub_note() {
        let couriers = sample_couriers();
        let info = Hub::I5Corridor.info();
        let html = SignupConfirmationHtml {
            name: "Dana",
            date: "December 6, 2025",
            location: "I5 Corridor",
            address_lines: info.full_address.split('\n').collect(),
            note: info.note,
            meal_description: "Lentil soup",
            freezer_friendly: false,
            cancellation_url: "https://meals.example.org/cancel/abc",
            couriers: &couriers,
        }
        .render()
        .unwrap();

        assert!(html.contains("Message courier to set location"));
    }

    #[test]
    fn test_courier_notice_contains_counts_and_note() {
        let html = CourierSignupNoticeHtml {
            provider_name: "Dana",
            provider_phone: "503-555-0142",
            meal_description: "Lentil soup",
            freezer_friendly: true,
            can_bring_to_salem: false,
            note_to_courier: Some("Gate code 1234"),
            date: "December 6, 2025",
            location: "Salem",
            total_meals: 3,
        }
        .render()
        .unwrap();

        assert!(html.contains("Gate code 1234"));
        assert!(html.contains('3'));
        assert!(html.contains("503-555-0142"));
    }

    #[test]
    fn test_cancellation_notice_pluralizes_remaining() {
        let one = CancellationNoticeText {
            provider_name: "Dana",
            meal_description: "Lentil soup",
            date: "December 6, 2025",
            location: "Salem",
            remaining_count: 1,
        }
        .render()
        .unwrap();
        assert!(one.contains("1 meal remaining"));

        let two = CancellationNoticeText {
            provider_name: "Dana",
            meal_description: "Lentil soup",
            date: "December 6, 2025",
            location: "Salem",
            remaining_count: 2,
        }
        .render()
        .unwrap();
        assert!(two.contains("2 meals remaining"));
    }

    #[test]
    fn test_courier_summary_lists_each_meal() {
        let meals = vec![
            MealSignup {
                id: MealSignupId::new(1),
                pickup_location_id: PickupLocationId::new(1),
                name: "Dana".to_string(),
                phone: Phone::parse("503-555-0142").unwrap(),
                email: Email::parse("dana@example.com").unwrap(),
                meal_description: "Lentil soup".to_string(),
                freezer_friendly: true,
                note_to_courier: Some("Gate code 1234".to_string()),
                can_bring_to_salem: false,
                cancellation_token: uuid::Uuid::nil(),
                cancelled_at: None,
                created_at: Utc::now(),
            },
            MealSignup {
                id: MealSignupId::new(2),
                pickup_location_id: PickupLocationId::new(1),
                name: "Sam".to_string(),
                phone: Phone::parse("503-555-0177").unwrap(),
                email: Email::parse("sam@example.com").unwrap(),
                meal_description: "Casserole".to_string(),
                freezer_friendly: false,
                note_to_courier: None,
                can_bring_to_salem: true,
                cancellation_token: uuid::Uuid::nil(),
                cancelled_at: None,
                created_at: Utc::now(),
            },
        ];

        let html = CourierSummaryHtml {
            location: "Portland",
            date: "December 6, 2025",
            meals: &meals,
        }
        .render()
        .unwrap();

        assert!(html.contains("Dana"));
        assert!(html.contains("Sam"));
        assert!(html.contains("Gate code 1234"));
        assert!(html.contains("Meal 1 of 2"));
        assert!(html.contains("Meal 2 of 2"));
    }

    #[test]
    fn test_reminder_text_contains_courier_contacts() {
        let couriers = sample_couriers();
        let text = ReminderText {
            name: "Dana",
            date: "December 6, 2025",
            location: "Portland",
            full_address: Hub::Portland.info().full_address,
            note: None,
            meal_description: "Lentil soup",
            couriers: &couriers,
        }
        .render()
        .unwrap();

        assert!(text.contains("Robin"));
        assert!(text.contains("robin@example.com"));
        assert!(text.contains("Jantzen Beach Target"));
    }

    #[test]
    fn test_html_escapes_user_content() {
        let couriers = sample_couriers();
        let html = SignupConfirmationHtml {
            name: "<script>alert(1)</script>",
            date: "December 6, 2025",
            location: "Salem",
            address_lines: vec!["255 Capitol St NE"],
            note: None,
            meal_description: "Soup",
            freezer_friendly: false,
            cancellation_url: "https://meals.example.org/cancel/abc",
            couriers: &couriers,
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>"));
    }
}
