//! Integration tests for token-based dependency injection
//!
//! Tests the flow from token definition to service resolution: trait object
//! tokens, constructor injection across several levels, and singleton caching.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use strata_core::container::{
    Container, ContainerError, Dependency, Injectable, ResolvedDependencies, ServiceToken, Target,
};

/// Test service trait
trait EmailService: Send + Sync {
    fn send(&self, to: &str, subject: &str) -> Result<String, String>;
    fn get_provider(&self) -> &str;
}

/// SMTP implementation of EmailService
#[derive(Default)]
struct SmtpEmailService;

impl EmailService for SmtpEmailService {
    fn send(&self, to: &str, subject: &str) -> Result<String, String> {
        Ok(format!("smtp:{}:{}", to, subject))
    }

    fn get_provider(&self) -> &str {
        "smtp"
    }
}

/// SendGrid implementation of EmailService
struct SendGridEmailService {
    api_key: String,
}

impl EmailService for SendGridEmailService {
    fn send(&self, to: &str, subject: &str) -> Result<String, String> {
        if self.api_key.is_empty() {
            return Err("missing api key".to_string());
        }
        Ok(format!("sendgrid:{}:{}", to, subject))
    }

    fn get_provider(&self) -> &str {
        "sendgrid"
    }
}

struct MailSettings {
    from: String,
}

/// Notification service depending on a mailer and settings
struct NotificationService {
    mailer: Arc<dyn EmailService>,
    settings: Arc<MailSettings>,
}

impl NotificationService {
    fn notify(&self, to: &str) -> Result<String, String> {
        self.mailer
            .send(to, &format!("from {}", self.settings.from))
    }
}

strata_core::service_token! {
    /// Email notification token
    EmailNotificationToken => dyn EmailService;
    /// Marketing email token (same service type, separate binding)
    MarketingEmailToken => dyn EmailService;
    MailSettingsToken => MailSettings;
    NotificationToken => NotificationService;
}

impl Injectable<dyn EmailService> for SmtpEmailService {
    fn construct(
        _deps: &mut ResolvedDependencies,
    ) -> Result<Arc<dyn EmailService>, ContainerError> {
        Ok(Arc::new(SmtpEmailService))
    }
}

impl Injectable<NotificationService> for NotificationService {
    fn dependencies() -> Vec<Dependency> {
        vec![
            Dependency::on::<EmailNotificationToken>(),
            Dependency::on::<MailSettingsToken>(),
        ]
    }

    fn construct(
        deps: &mut ResolvedDependencies,
    ) -> Result<Arc<NotificationService>, ContainerError> {
        Ok(Arc::new(NotificationService {
            mailer: deps.next::<EmailNotificationToken>()?,
            settings: deps.next::<MailSettingsToken>()?,
        }))
    }
}

fn mail_settings() -> Arc<MailSettings> {
    Arc::new(MailSettings {
        from: "noreply@example.com".to_string(),
    })
}

#[test]
fn test_trait_object_tokens_resolve_independently() {
    let container = Container::new();
    container
        .bind::<EmailNotificationToken>()
        .to(Target::class::<SmtpEmailService>());
    container
        .bind::<MarketingEmailToken>()
        .to_factory(|| {
            Arc::new(SendGridEmailService {
                api_key: "key".to_string(),
            })
        });

    let notifications = container.get::<EmailNotificationToken>().unwrap();
    let marketing = container.get::<MarketingEmailToken>().unwrap();

    assert_eq!(notifications.get_provider(), "smtp");
    assert_eq!(marketing.get_provider(), "sendgrid");
    assert_eq!(
        marketing.send("a@example.com", "sale").unwrap(),
        "sendgrid:a@example.com:sale"
    );
}

#[test]
fn test_constructor_injection_shares_singletons() {
    let container = Container::new();
    container
        .bind::<EmailNotificationToken>()
        .to(Target::class::<SmtpEmailService>());
    container
        .bind::<MailSettingsToken>()
        .to_instance(mail_settings());
    container
        .bind::<NotificationToken>()
        .to_class::<NotificationService>();

    let service = container.get::<NotificationToken>().unwrap();

    assert_eq!(
        service.notify("b@example.com").unwrap(),
        "smtp:b@example.com:from noreply@example.com"
    );
    assert!(Arc::ptr_eq(
        &service.mailer,
        &container.get::<EmailNotificationToken>().unwrap()
    ));
    assert!(Arc::ptr_eq(
        &service,
        &container.get::<NotificationToken>().unwrap()
    ));
}

#[test]
fn test_binding_order_does_not_matter() {
    let container = Container::new();
    container
        .bind::<NotificationToken>()
        .to_class::<NotificationService>();
    container
        .bind::<MailSettingsToken>()
        .to_instance(mail_settings());
    container
        .bind::<EmailNotificationToken>()
        .to(Target::class::<SmtpEmailService>());

    assert!(container.get::<NotificationToken>().is_ok());
}

#[test]
fn test_missing_transitive_binding_is_unbound() {
    let container = Container::new();
    container
        .bind::<NotificationToken>()
        .to_class::<NotificationService>();
    container
        .bind::<EmailNotificationToken>()
        .to(Target::class::<SmtpEmailService>());

    let err = container.get::<NotificationToken>().err().unwrap();

    assert_eq!(
        err.unbound_service(),
        Some(MailSettingsToken::token_type_name())
    );
    assert!(!container.is_resolved::<NotificationToken>());
    // dependencies resolved before the failure stay cached
    assert!(container.is_resolved::<EmailNotificationToken>());
}

#[test]
fn test_first_binding_wins() {
    let container = Container::new();
    container
        .bind::<EmailNotificationToken>()
        .to(Target::class::<SmtpEmailService>());
    container
        .bind::<EmailNotificationToken>()
        .to_factory(|| {
            Arc::new(SendGridEmailService {
                api_key: String::new(),
            })
        });

    assert_eq!(container.binding_count(), 1);
    assert_eq!(
        container
            .get::<EmailNotificationToken>()
            .unwrap()
            .get_provider(),
        "smtp"
    );
}

#[test]
fn test_factory_runs_once_across_threads() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    let container = Arc::new(Container::new());
    container.bind::<MailSettingsToken>().to_factory(|| {
        CALLS.fetch_add(1, Ordering::SeqCst);
        mail_settings()
    });

    let first = container.get::<MailSettingsToken>().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let container = Arc::clone(&container);
            std::thread::spawn(move || container.get::<MailSettingsToken>().unwrap())
        })
        .collect();

    for handle in handles {
        assert!(Arc::ptr_eq(&first, &handle.join().unwrap()));
    }
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_factory_surfaces_construction_failure() {
    let container = Container::new();
    container
        .bind::<MarketingEmailToken>()
        .to(Target::try_factory(|| -> Result<Arc<dyn EmailService>, String> {
            Err("sendgrid api key not configured".to_string())
        }));

    let err = container.get::<MarketingEmailToken>().err().unwrap();

    assert!(matches!(err, ContainerError::ConstructionFailure { .. }));
    assert!(err.to_string().contains("sendgrid api key not configured"));
    assert!(!container.is_resolved::<MarketingEmailToken>());
}
