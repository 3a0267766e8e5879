use folio_contact::{Field, SubmissionState, SubmitError};

mod helpers;

#[tokio::test]
async fn test_short_names_never_reach_delivery() -> anyhow::Result<()> {
    let mut s = helpers::setup();
    helpers::fill_valid(&mut s.flow);

    for name in ["", " ", "J", "  J  ", "\tx\n", "é"] {
        s.flow.update_field(Field::Name, name);
        let err = s.flow.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::InvalidName), "{name:?}");
        assert_eq!(s.flow.status(), "Please enter a valid name.");
    }

    assert_eq!(s.delivery.calls(), 0);

    Ok(())
}

#[tokio::test]
async fn test_invalid_emails_are_rejected() -> anyhow::Result<()> {
    let mut s = helpers::setup();
    helpers::fill_valid(&mut s.flow);

    for email in [
        "",
        "jane",
        "jane@",
        "jane@example",
        "jane@example.c",
        "jane@exa mple.com",
        "jane@example.com ",
    ] {
        s.flow.update_field(Field::Email, email);
        let err = s.flow.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::InvalidEmail), "{email:?}");
    }

    assert_eq!(s.delivery.calls(), 0);

    Ok(())
}

#[tokio::test]
async fn test_message_length_is_boundary_inclusive() -> anyhow::Result<()> {
    let mut s = helpers::setup();
    helpers::fill_valid(&mut s.flow);

    s.flow.update_field(Field::Message, "x".repeat(9));
    assert!(matches!(
        s.flow.submit().await.unwrap_err(),
        SubmitError::MessageTooShort
    ));

    s.flow.update_field(Field::Message, "x".repeat(2001));
    assert!(matches!(
        s.flow.submit().await.unwrap_err(),
        SubmitError::MessageTooLong
    ));
    assert_eq!(
        s.flow.status(),
        "Message is too long (max 2000 characters)."
    );
    assert_eq!(s.delivery.calls(), 0);

    s.flow.update_field(Field::Message, "x".repeat(10));
    s.flow.submit().await?;
    assert_eq!(s.delivery.calls(), 1);

    let mut s = helpers::setup();
    helpers::fill_valid(&mut s.flow);
    s.flow.update_field(Field::Message, "ü".repeat(2000));
    s.flow.submit().await?;
    assert_eq!(s.delivery.calls(), 1);

    Ok(())
}

#[tokio::test]
async fn test_rejection_is_idempotent() -> anyhow::Result<()> {
    let mut s = helpers::setup();
    helpers::fill(&mut s.flow, "Jane Doe", "jane@example", "Hello there friend", "");

    for _ in 0..5 {
        let err = s.flow.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::InvalidEmail));
        assert_eq!(s.flow.state(), &SubmissionState::Idle);
    }

    assert_eq!(s.delivery.calls(), 0);
    assert_eq!(s.flow.form().email, "jane@example");

    Ok(())
}

#[tokio::test]
async fn test_honeypot_blocks_any_value() -> anyhow::Result<()> {
    let mut s = helpers::setup();

    for company in ["x", " Acme ", "\u{00a0}y"] {
        helpers::fill_valid(&mut s.flow);
        s.flow.update_field(Field::Company, company);

        let err = s.flow.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::SpamDetected), "{company:?}");
        assert!(err.is_validation());
    }

    assert_eq!(s.delivery.calls(), 0);

    Ok(())
}

#[tokio::test]
async fn test_link_variants_are_blocked() -> anyhow::Result<()> {
    let mut s = helpers::setup();
    helpers::fill_valid(&mut s.flow);

    for message in [
        "Please look at http://example.com soon",
        "Please look at HTTPS://EXAMPLE.COM soon",
        "Please look at www.example.com soon",
    ] {
        s.flow.update_field(Field::Message, message);
        let err = s.flow.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::LinksNotAllowed), "{message}");
    }

    assert_eq!(s.delivery.calls(), 0);

    Ok(())
}
