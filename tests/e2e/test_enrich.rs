use crate::e2e::helpers::{fixtures, TestContext};

use anki_tts::controllers::enrich::{RunOptions, RunReport};
use anki_tts::domain::enrichment::BatchSummary;
use anki_tts::error::AppError;
use pretty_assertions::assert_eq;
use test_context::test_context;

const YES: RunOptions = RunOptions {
    assume_yes: true,
    dry_run: false,
};

fn seed_deck(ctx: &TestContext) {
    ctx.anki.add_card(fixtures::card(1, 10, "<div>Hello /həˈloʊ/ world</div>"));
    // Reverse card of the same note
    ctx.anki.add_card(fixtures::card(2, 10, "<div>Hello /həˈloʊ/ world</div>"));
    ctx.anki.add_card(fixtures::card(3, 30, "Done<br><br>[sound:done.mp3]"));
    ctx.anki.add_card(fixtures::card(4, 40, "<p>Break the ice.idiom</p><p>verb phrase</p>"));
}

fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_add_audio_to_every_unique_note(ctx: &TestContext) {
    seed_deck(ctx);
    let mut out = Vec::new();

    let report = ctx
        .controller(ctx.settings())
        .run(YES, &b""[..], &mut out)
        .await
        .unwrap();

    assert_eq!(
        report,
        RunReport::Completed(BatchSummary {
            succeeded: 2,
            failed: 0
        })
    );

    let out = output(out);
    assert!(out.contains("Found 2 unique notes without audio."));
    assert!(out.contains("Card #1: Hello world"));
    assert!(out.contains("Card #2: Break the ice"));
    assert!(out.contains("- Successfully added audio to 2 cards"));
    assert!(!out.contains("Failed to process"));

    let front = ctx.anki.note_field(10, "Front").unwrap();
    assert!(front.starts_with("<div>Hello /həˈloʊ/ world</div><br><br>[sound:openai-generated-hello-world-"));
    assert!(front.ends_with(".mp3]"));
    let front = ctx.anki.note_field(40, "Front").unwrap();
    assert!(front.contains("[sound:openai-generated-break-the-ice-"));
    assert_eq!(
        ctx.anki.note_field(30, "Front").as_deref(),
        Some("Done<br><br>[sound:done.mp3]")
    );

    assert_eq!(ctx.anki.media_count(), 2);
    assert_eq!(ctx.saved_audio_files(), 2);
    assert_eq!(ctx.anki.requests_for("updateNoteFields").len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_find_nothing_on_a_second_run(ctx: &TestContext) {
    seed_deck(ctx);
    let controller = ctx.controller(ctx.settings());
    controller.run(YES, &b""[..], &mut Vec::new()).await.unwrap();

    let mut out = Vec::new();
    let report = controller.run(YES, &b""[..], &mut out).await.unwrap();

    assert_eq!(report, RunReport::NothingToDo);
    assert!(output(out).contains("No cards need modification."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_proceed_when_the_user_confirms(ctx: &TestContext) {
    seed_deck(ctx);
    let mut out = Vec::new();

    let report = ctx
        .controller(ctx.settings())
        .run(RunOptions::default(), &b"y\n"[..], &mut out)
        .await
        .unwrap();

    assert!(matches!(report, RunReport::Completed(BatchSummary { succeeded: 2, .. })));
    let out = output(out);
    assert!(out.contains("Do you want to proceed with adding audio to these cards? (yes/no): "));
    assert!(out.contains("Proceeding with modifications..."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_leave_cards_untouched_when_the_user_declines(ctx: &TestContext) {
    seed_deck(ctx);
    let mut out = Vec::new();

    let report = ctx
        .controller(ctx.settings())
        .run(RunOptions::default(), &b"no\n"[..], &mut out)
        .await
        .unwrap();

    assert_eq!(report, RunReport::Cancelled { listed: 2 });
    assert!(output(out).contains("Operation cancelled."));
    assert!(ctx.anki.requests_for("updateNoteFields").is_empty());
    assert!(ctx.tts.spoken().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_only_list_cards_on_dry_run(ctx: &TestContext) {
    seed_deck(ctx);
    let mut out = Vec::new();
    let options = RunOptions {
        assume_yes: false,
        dry_run: true,
    };

    let report = ctx
        .controller(ctx.settings())
        .run(options, &b""[..], &mut out)
        .await
        .unwrap();

    assert_eq!(report, RunReport::DryRun { listed: 2 });
    let out = output(out);
    assert!(out.contains("The following sentences would be modified:"));
    assert!(!out.contains("(yes/no)"));
    assert!(ctx.tts.spoken().is_empty());
    assert_eq!(ctx.anki.media_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_failed_cards_and_keep_going(ctx: &TestContext) {
    seed_deck(ctx);
    ctx.tts.fail_on("Hello world");
    let mut out = Vec::new();

    let report = ctx
        .controller(ctx.settings())
        .run(YES, &b""[..], &mut out)
        .await
        .unwrap();

    assert_eq!(
        report,
        RunReport::Completed(BatchSummary {
            succeeded: 1,
            failed: 1
        })
    );
    let out = output(out);
    assert!(out.contains("- Failed to process 1 cards"));
    assert!(out.contains("Card #1 [ID: 1]"));
    assert!(out.contains("rate limit reached"));
    assert!(!ctx.anki.note_field(10, "Front").unwrap().contains("[sound:"));
    assert!(ctx.anki.note_field(40, "Front").unwrap().contains("[sound:"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_the_configured_voice(ctx: &TestContext) {
    seed_deck(ctx);
    let mut settings = ctx.settings();
    settings.voice = Some("nova".to_string());

    ctx.controller(settings)
        .run(YES, &b""[..], &mut Vec::new())
        .await
        .unwrap();

    let voices: Vec<String> = ctx.tts.spoken().into_iter().map(|(_, voice)| voice).collect();
    assert_eq!(voices, vec!["nova".to_string(), "nova".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_the_run_when_anki_is_unreachable(ctx: &TestContext) {
    ctx.anki.fail_action("findCards", "collection is not available");

    let error = ctx
        .controller(ctx.settings())
        .run(YES, &b""[..], &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(error, AppError::Anki(_)));
    assert_eq!(error.exit_code(), 3);
    assert!(error.to_string().contains("collection is not available"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_number_listed_and_failed_cards_the_same_way(ctx: &TestContext) {
    ctx.anki.add_card(fixtures::card(5, 50, ""));
    ctx.anki.add_card(fixtures::card(6, 60, "Second card"));
    ctx.tts.fail_on("Second card");
    let mut out = Vec::new();

    ctx.controller(ctx.settings())
        .run(YES, &b""[..], &mut out)
        .await
        .unwrap();

    let out = output(out);
    assert!(!out.contains("Card #1:"));
    assert!(out.contains("Card #2: Second card"));
    assert!(out.contains("Card #1 [ID: 5]: card field 'Front' is missing or empty"));
    assert!(out.contains("Card #2 [ID: 6]"));
}
