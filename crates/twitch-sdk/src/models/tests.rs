use super::*;

fn user_json(id: &str, broadcaster_type: &str, extra: serde_json::Value) -> UserPayload {
    let mut body = serde_json::json!({
        "id": id,
        "login": "twitchdev",
        "display_name": "TwitchDev",
        "type": "",
        "broadcaster_type": broadcaster_type,
        "description": "Supporting third-party developers",
        "profile_image_url": "https://static-cdn.jtvnw.net/p.png",
        "offline_image_url": "",
        "view_count": 5980557,
        "created_at": "2016-12-14T20:32:28Z"
    });
    if let (Some(obj), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        obj.extend(extra.clone());
    }
    serde_json::from_value(body).unwrap()
}

#[test]
fn user_parses_known_enums_and_timestamp() {
    let user = User::try_from(user_json("141981764", "partner", serde_json::json!({}))).unwrap();
    assert!(user.is_partner());
    assert!(!user.is_staff());
    assert_eq!(user.username(), "twitchdev");
    assert_eq!(user.created_at().to_rfc3339(), "2016-12-14T20:32:28+00:00");
    assert_eq!(user.to_string(), "TwitchDev");
}

#[test]
fn unknown_broadcaster_type_is_schema_drift() {
    let err = User::try_from(user_json("1", "vip", serde_json::json!({}))).unwrap_err();
    assert!(matches!(
        err,
        TwitchError::ApiMismatch { kind: "BroadcasterType", ref value } if value == "vip"
    ));
}

#[test]
fn email_requires_authorization() {
    let user = User::try_from(user_json("1", "", serde_json::json!({}))).unwrap();
    assert!(matches!(user.email(), Err(TwitchError::NotAuthorized(_))));

    let user = User::try_from(user_json(
        "1",
        "",
        serde_json::json!({ "email": "dev@example.com" }),
    ))
    .unwrap();
    assert_eq!(user.email().unwrap(), "dev@example.com");
}

#[test]
fn partial_and_full_users_compare_by_id() {
    let user = User::try_from(user_json("7", "", serde_json::json!({}))).unwrap();
    let partial = PartialUser::new("7", "someone");
    let other = PartialUser::new("8", "someone");

    assert!(partial == user);
    assert!(user == partial);
    assert!(partial != other);
    assert_eq!(partial, PartialUser::new("7", "renamed"));
}

#[test]
fn resolvable_reports_its_state() {
    let user = User::try_from(user_json("7", "", serde_json::json!({}))).unwrap();
    let partial: Resolvable<PartialUser, User> = Resolvable::Partial(PartialUser::new("7", "x"));
    let resolved: Resolvable<PartialUser, User> = Resolvable::Resolved(user);

    assert!(!partial.is_resolved());
    assert!(resolved.is_resolved());
    assert!(partial.resolved().is_none());
    assert_eq!(resolved.resolved().map(User::username), Some("twitchdev"));
    assert!(partial == resolved);
}

#[test]
fn permanent_ban_expires_at_epoch() {
    let banned: BannedPartialUser = serde_json::from_value::<BannedUserPayload>(serde_json::json!({
        "user_id": "423374343",
        "user_name": "glowillig",
        "expires_at": ""
    }))
    .unwrap()
    .into();
    assert_eq!(banned.expires_at(), epoch());
    assert!(banned.is_permanent());

    let timed = BannedPartialUser::new("1", "x", Some("2019-03-15T02:00:28Z"));
    assert!(!timed.is_permanent());
    assert!(timed == PartialUser::new("1", "x"));
}

#[test]
fn malformed_timestamp_falls_back_to_epoch() {
    assert_eq!(parse_timestamp(Some("yesterday")), epoch());
    assert_eq!(parse_timestamp(None), epoch());
}

#[test]
fn clip_edit_url_is_privileged() {
    let payload: ClipPayload = serde_json::from_value(serde_json::json!({
        "id": "AwkwardHelplessSalamanderSwiftRage",
        "url": "https://clips.twitch.tv/AwkwardHelplessSalamanderSwiftRage",
        "embed_url": "https://clips.twitch.tv/embed?clip=AwkwardHelplessSalamanderSwiftRage",
        "broadcaster_id": "67955580",
        "broadcaster_name": "ChewieMelodies",
        "creator_id": "53834192",
        "creator_name": "BlackNova03",
        "video_id": "",
        "game_id": "488191",
        "language": "en",
        "title": "babymetal",
        "view_count": 10,
        "created_at": "2017-11-30T22:34:18Z",
        "thumbnail_url": "https://clips-media-assets.twitch.tv/157589949-preview-480x272.jpg"
    }))
    .unwrap();
    let clip = Clip::from(payload);

    assert!(matches!(clip.edit_url(), Err(TwitchError::NotAuthorized(_))));
    assert!(clip.video_id().is_none());
    assert_eq!(clip.broadcaster().username(), "ChewieMelodies");
    assert_eq!(clip.game().id(), "488191");
}

#[test]
fn non_numeric_identifier_fails_integer_conversion() {
    let tag = Identifier::new("621fb5bf-5498-4d8f-b4ac-db4d40d401bf");
    let err = tag.as_number().unwrap_err();
    assert!(matches!(err, TwitchError::Conversion(_)));
    assert_eq!(err.kind(), crate::ErrorKind::Conversion);

    assert_eq!(Identifier::new("42").as_number().unwrap(), 42);
    assert!(Identifier::new("42") == 42u64);
}

#[test]
fn subscription_tiers_are_strict() {
    let payload = |tier: &str| SubscriptionPayload {
        broadcaster_id: "141981764".into(),
        broadcaster_name: "TwitchDev".into(),
        user_id: "527115020".into(),
        user_name: "twitchgaming".into(),
        is_gift: false,
        tier: tier.into(),
        plan_name: "Channel Subscription (twitchdev)".into(),
    };

    let sub = Subscription::try_from(payload("2000")).unwrap();
    assert_eq!(sub.tier(), SubscriptionTier::Tier2);
    assert_eq!(sub, Subscription::try_from(payload("2000")).unwrap());
    assert_ne!(sub, Subscription::try_from(payload("1000")).unwrap());

    assert!(matches!(
        Subscription::try_from(payload("4000")),
        Err(TwitchError::ApiMismatch { kind: "SubscriptionTier", .. })
    ));
}

#[test]
fn extension_types_and_position() {
    let payload: ExtensionPayload = serde_json::from_value(serde_json::json!({
        "id": "wi08ebtatdc7oj83wtl9uxwz807l8b",
        "version": "1.1.8",
        "name": "Streamlabs Leaderboard",
        "can_activate": true,
        "type": ["panel", "overlay"],
        "x": 10,
        "y": 20
    }))
    .unwrap();
    let ext = Extension::try_from(payload.clone()).unwrap();
    assert!(ext.is_panel());
    assert!(ext.is_overlay());
    assert!(!ext.is_component());
    assert_eq!(ext.position(), Some((10, 20)));

    let mut bad = payload;
    bad.types.push("sidebar".into());
    assert!(matches!(
        Extension::try_from(bad),
        Err(TwitchError::ApiMismatch { kind: "ExtensionType", .. })
    ));
}

#[test]
fn moderation_event_builds_banned_target() {
    let payload: ModerationEventPayload = serde_json::from_value(serde_json::json!({
        "id": "1IPFqAb0p0JncbPSTEPhx8JF1Sa",
        "event_type": "moderation.user.ban",
        "event_timestamp": "2019-03-13T15:55:14Z",
        "version": "1.0",
        "event_data": {
            "broadcaster_id": "198704263",
            "broadcaster_name": "aan22209",
            "user_id": "424596340",
            "user_name": "quotrok",
            "expires_at": ""
        }
    }))
    .unwrap();
    let event = ModerationEvent::try_from(payload).unwrap();

    assert_eq!(event.event_type(), ModerationEventType::Ban);
    assert_eq!(event.from_user().username(), "aan22209");
    assert_eq!(event.for_user().id(), "424596340");
    assert!(event.for_user().is_permanent());
}

#[test]
fn unknown_moderation_event_type_fails() {
    let payload = ModerationEventPayload {
        id: "x".into(),
        event_type: "moderation.user.timeout".into(),
        event_timestamp: None,
        event_data: ModerationEventData {
            broadcaster_id: "1".into(),
            broadcaster_name: "a".into(),
            user_id: "2".into(),
            user_name: "b".into(),
            expires_at: None,
        },
    };
    assert!(ModerationEvent::try_from(payload).is_err());
}

#[test]
fn tag_locale_lookup() {
    let tag = Tag::from(TagPayload {
        tag_id: "621fb5bf-5498-4d8f-b4ac-db4d40d401bf".into(),
        is_auto: false,
        localization_names: [("en-us".to_string(), "English".to_string())].into(),
        localization_descriptions: Default::default(),
    });

    assert_eq!(tag.name("en-us").unwrap(), "English");
    assert!(matches!(tag.name("de-de"), Err(TwitchError::Validation(_))));
    assert!(tag.description("en-us").is_err());
    assert_eq!(tag.to_string(), "English");
    assert!(PartialTag::new("621fb5bf-5498-4d8f-b4ac-db4d40d401bf") == tag);
}

#[test]
fn stream_starts_with_partial_references() {
    let payload: StreamPayload = serde_json::from_value(serde_json::json!({
        "id": "26007494656",
        "user_id": "23161357",
        "user_login": "",
        "user_name": "LIRIK",
        "game_id": "417752",
        "type": "live",
        "title": "Hey Guys, It's Monday",
        "viewer_count": 32575,
        "started_at": "2017-08-14T16:08:32Z",
        "language": "en",
        "thumbnail_url": "https://static-cdn.jtvnw.net/previews-ttv/live_user_lirik-{width}x{height}.jpg",
        "tag_ids": ["6ea6bca4-4712-4ab9-a906-e3336a9d8039"]
    }))
    .unwrap();
    let stream = Stream::from(payload);

    assert!(stream.is_live());
    assert!(!stream.broadcaster().is_resolved());
    assert_eq!(stream.broadcaster_login(), "lirik");
    assert_eq!(stream.game().id(), "417752");
    assert_eq!(stream.tags().len(), 1);
    assert_eq!(
        stream.thumbnail_url_sized(320, 180),
        "https://static-cdn.jtvnw.net/previews-ttv/live_user_lirik-320x180.jpg"
    );
    assert_eq!(stream.to_string(), "LIRIK's stream");
}

#[test]
fn markers_are_flattened_across_videos() {
    let entries: Vec<StreamMarkersPayload> = serde_json::from_value(serde_json::json!([{
        "user_id": "123",
        "user_name": "display_name",
        "videos": [
            {
                "video_id": "456",
                "markers": [
                    {
                        "id": "106b8d6243a4f883d25ad75e6cdffdc4",
                        "created_at": "2018-08-20T20:10:03Z",
                        "description": "hello, this is a marker!",
                        "position_seconds": 244,
                        "URL": "https://twitch.tv/videos/456?t=0h4m06s"
                    }
                ]
            },
            {
                "video_id": "789",
                "markers": [
                    { "id": "a", "position_seconds": 1 },
                    { "id": "b", "position_seconds": 2 }
                ]
            }
        ]
    }]))
    .unwrap();

    let markers = flatten_markers(entries);
    assert_eq!(markers.len(), 3);
    assert_eq!(markers[0].video_id(), "456");
    assert_eq!(markers[0].url(), Some("https://twitch.tv/videos/456?t=0h4m06s"));
    assert_eq!(markers[2].video_id(), "789");
    assert_eq!(markers[2].created_at(), epoch());
}

#[test]
fn transaction_product_fields() {
    let payload: TransactionPayload = serde_json::from_value(serde_json::json!({
        "id": "74c52265-e214-48a6-91b9-23b6014e8041",
        "timestamp": "2019-01-28T04:15:53.325Z",
        "broadcaster_id": "439964613",
        "broadcaster_name": "chikuseuma",
        "user_id": "424596340",
        "user_name": "quotrok",
        "product_type": "BITS_IN_EXTENSION",
        "product_data": {
            "sku": "testSku100",
            "cost": { "amount": 100, "type": "bits" },
            "displayName": "Test Sku",
            "inDevelopment": false
        }
    }))
    .unwrap();
    let tx = Transaction::try_from(payload).unwrap();

    assert_eq!(tx.product_type(), ProductType::BitsInExtension);
    assert_eq!(tx.cost_type(), CostType::Bits);
    assert_eq!(tx.cost_amount(), 100);
    assert_eq!(tx.product_name(), "Test Sku");
    assert_eq!(tx.receiving_user().username(), "chikuseuma");
}
