//! Tests for stored conversation shapes.

use parley_core::{MessageType, Role, StoredMessage, StoredMessageBuilder, StoredPart};
use serde_json::json;

#[test]
fn test_parts_message_deserializes_in_order() -> anyhow::Result<()> {
    let message: StoredMessage = serde_json::from_value(json!({
        "role": "user",
        "content": "",
        "type": "parts",
        "parts": [
            {"text": "look at this"},
            {"inlineData": {"mimeType": "image/jpeg", "url": "https://cdn.example.com/a.jpg"}},
            {"text": "and tell me"}
        ],
        "createdAt": "2025-03-01T10:00:00Z"
    }))?;

    assert_eq!(message.role, Role::User);
    assert_eq!(message.kind, MessageType::Parts);

    let parts = message.effective_parts();
    assert_eq!(parts.len(), 3);
    assert!(matches!(&parts[0], StoredPart::Text(t) if t.text == "look at this"));
    assert!(matches!(&parts[1], StoredPart::Image(i)
        if i.inline_data.url.as_deref() == Some("https://cdn.example.com/a.jpg")));
    assert!(matches!(&parts[2], StoredPart::Text(t) if t.text == "and tell me"));
    Ok(())
}

#[test]
fn test_legacy_text_message_lifts_to_single_part() -> anyhow::Result<()> {
    let message: StoredMessage = serde_json::from_value(json!({
        "role": "model",
        "content": "Hello there",
        "type": "text",
        "createdAt": "2025-03-01T10:00:00Z"
    }))?;

    assert_eq!(message.effective_parts(), vec![StoredPart::text("Hello there")]);
    Ok(())
}

#[test]
fn test_legacy_image_message_lifts_text_then_image() -> anyhow::Result<()> {
    let message = StoredMessageBuilder::default()
        .role(Role::User)
        .content("what is this?")
        .image(Some("https://cdn.example.com/b.png".to_string()))
        .mime_type(Some("image/png".to_string()))
        .build()?;

    let parts = message.effective_parts();
    assert_eq!(
        parts,
        vec![
            StoredPart::text("what is this?"),
            StoredPart::image("https://cdn.example.com/b.png", Some("image/png".to_string())),
        ]
    );
    Ok(())
}

#[test]
fn test_parts_type_with_empty_parts_falls_back_to_content() -> anyhow::Result<()> {
    let message = StoredMessageBuilder::default()
        .role(Role::User)
        .content("fallback")
        .kind(MessageType::Parts)
        .build()?;

    assert_eq!(message.effective_parts(), vec![StoredPart::text("fallback")]);
    Ok(())
}

#[test]
fn test_parts_are_authoritative_over_legacy_fields() -> anyhow::Result<()> {
    let message = StoredMessageBuilder::default()
        .role(Role::User)
        .content("ignored")
        .image(Some("https://cdn.example.com/ignored.png".to_string()))
        .kind(MessageType::Parts)
        .parts(vec![StoredPart::text("kept")])
        .build()?;

    assert_eq!(message.effective_parts(), vec![StoredPart::text("kept")]);
    Ok(())
}

#[test]
fn test_participant_filter() -> anyhow::Result<()> {
    let user = StoredMessageBuilder::default().role(Role::User).build()?;
    let model = StoredMessageBuilder::default().role(Role::Model).build()?;
    let system = StoredMessageBuilder::default().role(Role::System).build()?;
    let error = StoredMessageBuilder::default()
        .role(Role::Model)
        .kind(MessageType::Error)
        .content("Something went wrong")
        .build()?;

    assert!(user.is_participant());
    assert!(model.is_participant());
    assert!(!system.is_participant());
    assert!(!error.is_participant());
    Ok(())
}

#[test]
fn test_unknown_role_deserializes_as_other() -> anyhow::Result<()> {
    let message: StoredMessage = serde_json::from_value(json!({
        "role": "tool",
        "content": "result"
    }))?;
    assert_eq!(message.role, Role::Other);
    assert!(!message.is_participant());
    Ok(())
}

#[test]
fn test_thought_signature_survives_reserialization() -> anyhow::Result<()> {
    let raw = json!([
        {"text": "thinking...", "thought": true, "thoughtSignature": "c2lnLTE="},
        {"inlineData": {"mimeType": "image/png", "url": "https://cdn.example.com/c.png"},
         "thoughtSignature": "c2lnLTI="},
        {"executableCode": {"language": "PYTHON", "code": "print(1)"}}
    ]);

    let parts: Vec<StoredPart> = serde_json::from_value(raw.clone())?;
    assert_eq!(parts[0].thought_signature(), Some("c2lnLTE="));
    assert_eq!(parts[1].thought_signature(), Some("c2lnLTI="));
    assert!(matches!(parts[2], StoredPart::Unsupported(_)));

    assert_eq!(serde_json::to_value(&parts)?, raw);
    Ok(())
}
