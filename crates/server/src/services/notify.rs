//! Post-commit notification fan-out.
//!
//! Workflows call these helpers after their single committing write. The
//! sends run on a spawned task so the HTTP response never waits on SMTP;
//! failures land in the log and nowhere else.

use chrono::NaiveDate;

use mealtrain_core::Hub;

use crate::models::{Courier, CourierContact};
use crate::services::email::{
    CancellationConfirmation, CancellationNotice, CourierSignupNotice, EmailService,
    SignupConfirmation,
};

/// Everything the signup fan-out needs, owned so it can cross into the task.
#[derive(Debug)]
pub struct SignupNotification {
    pub provider_name: String,
    pub provider_phone: String,
    pub provider_email: String,
    pub meal_description: String,
    pub freezer_friendly: bool,
    pub can_bring_to_salem: bool,
    pub note_to_courier: Option<String>,
    pub pickup_date: NaiveDate,
    pub hub: Hub,
    pub cancellation_url: String,
    pub couriers: Vec<Courier>,
    pub total_meals: i64,
}

/// Everything the cancellation fan-out needs.
#[derive(Debug)]
pub struct CancellationNotification {
    pub provider_name: String,
    pub provider_email: String,
    pub meal_description: String,
    pub pickup_date: NaiveDate,
    pub hub: Hub,
    pub remaining_count: i64,
    pub couriers: Vec<Courier>,
}

/// Confirmation to the provider plus a notice to every matched courier.
pub fn spawn_signup_emails(email: EmailService, n: SignupNotification) {
    tokio::spawn(async move {
        let contacts: Vec<CourierContact> = n.couriers.iter().map(CourierContact::from).collect();

        if let Err(e) = email
            .send_signup_confirmation(SignupConfirmation {
                to: &n.provider_email,
                provider_name: &n.provider_name,
                pickup_date: n.pickup_date,
                hub: n.hub,
                meal_description: &n.meal_description,
                freezer_friendly: n.freezer_friendly,
                cancellation_url: &n.cancellation_url,
                couriers: &contacts,
            })
            .await
        {
            tracing::error!(to = %n.provider_email, error = %e, "Failed to send confirmation email");
        }

        for courier in &n.couriers {
            if let Err(e) = email
                .send_courier_signup_notice(CourierSignupNotice {
                    to: courier.email.as_str(),
                    provider_name: &n.provider_name,
                    provider_phone: &n.provider_phone,
                    meal_description: &n.meal_description,
                    freezer_friendly: n.freezer_friendly,
                    can_bring_to_salem: n.can_bring_to_salem,
                    note_to_courier: n.note_to_courier.as_deref(),
                    pickup_date: n.pickup_date,
                    hub: n.hub,
                    total_meals: n.total_meals,
                })
                .await
            {
                tracing::error!(to = %courier.email, error = %e, "Failed to send courier notification");
            }
        }
    });
}

/// Notice to every matched courier plus a confirmation to the provider.
pub fn spawn_cancellation_emails(email: EmailService, n: CancellationNotification) {
    tokio::spawn(async move {
        for courier in &n.couriers {
            if let Err(e) = email
                .send_cancellation_notice(CancellationNotice {
                    to: courier.email.as_str(),
                    provider_name: &n.provider_name,
                    meal_description: &n.meal_description,
                    pickup_date: n.pickup_date,
                    hub: n.hub,
                    remaining_count: n.remaining_count,
                })
                .await
            {
                tracing::error!(to = %courier.email, error = %e, "Failed to send cancellation notice");
            }
        }

        if let Err(e) = email
            .send_cancellation_confirmation(CancellationConfirmation {
                to: &n.provider_email,
                provider_name: &n.provider_name,
                meal_description: &n.meal_description,
                pickup_date: n.pickup_date,
                hub: n.hub,
            })
            .await
        {
            tracing::error!(to = %n.provider_email, error = %e, "Failed to send cancellation confirmation");
        }
    });
}
