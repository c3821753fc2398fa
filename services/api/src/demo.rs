use crate::infra::{default_intake, InMemoryEventRepository, LoggingNotifier};
use chrono::{Duration, Local};
use clap::Args;
use marquee::error::AppError;
use marquee::workflows::events::submission::{
    EventSubmission, EventSubmissionService, PromotionNotice, StoredEvent,
};
use marquee::workflows::events::{resolve_video, ImageSubmission, TierCatalog};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

type DemoService = EventSubmissionService<InMemoryEventRepository, LoggingNotifier>;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Promotion tier exercised by the happy-path submission
    #[arg(long, default_value = "boost")]
    pub(crate) tier: String,
    /// Currency applied when organizers omit one
    #[arg(long, default_value = "USD")]
    pub(crate) currency: String,
    /// Print full confirmation payloads alongside the summaries
    #[arg(long)]
    pub(crate) include_payloads: bool,
}

#[derive(Args, Debug)]
pub(crate) struct VideoArgs {
    /// Video page url to resolve (YouTube, Vimeo, or Facebook)
    pub(crate) url: String,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Path to a JSON file holding an event submission payload
    pub(crate) file: PathBuf,
    /// Currency applied when the payload omits one
    #[arg(long, default_value = "USD")]
    pub(crate) currency: String,
}

pub(crate) fn print_tier_catalog() {
    let catalog = TierCatalog::standard();

    println!("Promotion tiers");
    for tier in catalog.tiers() {
        println!(
            "- {} | {:.2} {} | up to {} images, {} videos",
            tier.id.label(),
            tier.price_amount,
            tier.billing_period.label(),
            tier.image_quota,
            tier.video_quota
        );
        for feature in &tier.features {
            println!("    * {}", feature);
        }
    }
}

pub(crate) fn run_video_lookup(args: VideoArgs) -> Result<(), AppError> {
    match resolve_video(&args.url) {
        Some(video) => {
            println!("Platform: {}", video.platform.label());
            println!("Video id: {}", video.video_id);
            println!("Embed url: {}", video.embed_url);
        }
        None => println!("Unsupported video url: {}", args.url),
    }

    Ok(())
}

pub(crate) fn run_submit_file(args: SubmitArgs) -> Result<(), AppError> {
    let SubmitArgs { file, currency } = args;

    let raw = std::fs::read_to_string(&file)?;
    let submission: EventSubmission = serde_json::from_str(&raw)?;

    let (service, notifier) = in_memory_service(&currency);
    match service.submit(&submission) {
        Ok(stored) => {
            print_confirmation(&stored, true);
            render_notices(&notifier.notices());
        }
        Err(err) => println!("Submission rejected: {}", err),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        tier,
        currency,
        include_payloads,
    } = args;

    println!("Event submission demo");
    let (service, notifier) = in_memory_service(&currency);

    let submission = demo_submission(&tier);
    let stored = match service.submit(&submission) {
        Ok(stored) => stored,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    print_confirmation(&stored, include_payloads);

    println!("\nOversized gallery (rejected, never trimmed)");
    let mut oversized = demo_submission("free");
    oversized.images = (0..3)
        .map(|index| ImageSubmission {
            url: format!("https://cdn.example.net/demo/gallery-{index}.jpg"),
            caption: None,
            order: None,
        })
        .collect();
    match service.submit(&oversized) {
        Ok(stored) => println!("  Unexpectedly accepted as {}", stored.event_id),
        Err(err) => println!("  {}", err),
    }

    println!("\nIncomplete form (every gap reported at once)");
    let mut incomplete = demo_submission(&tier);
    incomplete.title.clear();
    incomplete.venue = "  ".to_string();
    incomplete.capacity = Some(0);
    match service.submit(&incomplete) {
        Ok(stored) => println!("  Unexpectedly accepted as {}", stored.event_id),
        Err(err) => println!("  {}", err),
    }

    println!("\nResubmission (same id, fresh review)");
    let mut revised = submission.clone();
    revised.description = "Extended evening with two encore performances.".to_string();
    match service.resubmit(&stored.event_id, &revised) {
        Ok(updated) => print_confirmation(&updated, include_payloads),
        Err(err) => println!("  Resubmission rejected: {}", err),
    }

    render_notices(&notifier.notices());

    match service.pending() {
        Ok(pending) => println!("\nEvents awaiting review: {}", pending.len()),
        Err(err) => println!("\nPending lookup unavailable: {}", err),
    }

    Ok(())
}

fn in_memory_service(default_currency: &str) -> (Arc<DemoService>, Arc<LoggingNotifier>) {
    let repository = Arc::new(InMemoryEventRepository::default());
    let notifier = Arc::new(LoggingNotifier::default());
    let service = Arc::new(EventSubmissionService::new(
        repository,
        notifier.clone(),
        default_intake(default_currency),
    ));
    (service, notifier)
}

fn demo_submission(tier: &str) -> EventSubmission {
    let start = Local::now().date_naive() + Duration::days(30);

    EventSubmission {
        title: "Riverlight Night Market".to_string(),
        category: "Markets & Fairs".to_string(),
        description: "Fifty stalls of street food, craft, and live performances along the river."
            .to_string(),
        start_date: Some(start),
        end_date: Some(start + Duration::days(1)),
        venue: "Old Mill Riverfront".to_string(),
        organizer_name: "Riverlight Collective".to_string(),
        organizer_currency: None,
        capacity: Some(1200),
        images: vec![
            ImageSubmission {
                url: "https://cdn.example.net/demo/lantern-walk.jpg".to_string(),
                caption: Some("Lantern walk at dusk".to_string()),
                order: Some(0),
            },
            ImageSubmission {
                url: "https://cdn.example.net/demo/stalls.jpg".to_string(),
                caption: None,
                order: None,
            },
        ],
        videos: vec!["https://youtu.be/dQw4w9WgXcQ".to_string()],
        promotion_tier: Some(tier.to_string()),
        ticketing: json!({
            "general": 12.5,
            "vip": 40.0,
            "earlyBird": { "price": 8.0 }
        }),
    }
}

fn print_confirmation(stored: &StoredEvent, include_payload: bool) {
    let view = stored.confirmation_view();
    println!(
        "- Stored {} \"{}\" -> status {} ({} tier)",
        view.event_id, view.title, view.status, view.promotion_tier
    );
    println!(
        "  {} images | {} videos | {} ticket tiers",
        view.image_count,
        view.video_count,
        view.ticket_tiers.len()
    );

    if include_payload {
        match serde_json::to_string_pretty(&view) {
            Ok(payload) => println!("  Confirmation payload:\n{}", payload),
            Err(err) => println!("  Confirmation payload unavailable: {}", err),
        }
    }
}

fn render_notices(notices: &[PromotionNotice]) {
    if notices.is_empty() {
        println!("\nPromotion notices: none dispatched");
        return;
    }

    println!("\nPromotion notices");
    for notice in notices {
        println!(
            "- {} upgraded to {} at {:.2} {}",
            notice.event_id,
            notice.tier.label(),
            notice.price_amount,
            notice.billing_period.label()
        );
    }
}
