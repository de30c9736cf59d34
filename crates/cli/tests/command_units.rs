use devpair::commands::{
    decode_pair_command, describe_evidence, pair_id_output, validate_pair_command,
};
use devpair_core::dump::Bounds;
use devpair_core::{Evidence, TokenOrder};

#[test]
fn pair_id_output_records_order() {
    let output = pair_id_output("9", "10", false);
    assert_eq!(output.pair_id, "pair_10_9");
    assert_eq!(output.order, TokenOrder::Lexicographic);

    let output = pair_id_output("9", "10", true);
    assert_eq!(output.pair_id, "pair_9_10");
    assert_eq!(output.order, TokenOrder::Numeric);
}

#[test]
fn decode_pair_command_propagates_parse_errors() {
    decode_pair_command("pair_10_33", false).unwrap();
    decode_pair_command("pair_10_33", true).unwrap();
    let err = decode_pair_command("nope", false).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid pair ID format: nope"));
}

#[test]
fn validate_pair_command_rejects_unsorted() {
    validate_pair_command("pair_1_99").unwrap();
    let err = validate_pair_command("pair_99_1").unwrap_err();
    assert!(err.to_string().contains("pair_99_1"));
}

#[test]
fn evidence_descriptions_include_tap_point() {
    let evidence = Evidence::SendFriendRequest {
        resource_id: "com.zing.zalo:id/btn_send_friend_request".into(),
        bounds: Some(Bounds { left: 866, top: 1150, right: 1000, bottom: 1222 }),
    };
    assert_eq!(
        describe_evidence(&evidence),
        "friend request button com.zing.zalo:id/btn_send_friend_request at [866,1150][1000,1222] (tap 933,1186)"
    );
    assert_eq!(describe_evidence(&Evidence::TruncatedDump { bytes: 12 }), "UI dump too small (12 bytes)");
    assert_eq!(describe_evidence(&Evidence::MissingDump), "no UI dump found for device");
}

#[test]
fn evidence_description_survives_extreme_bounds() {
    let evidence = Evidence::ChatInput {
        resource_id: "chatinput_text".into(),
        bounds: Bounds::parse("[2147483000,0][2147483600,10]"),
    };
    assert!(describe_evidence(&evidence).ends_with("(tap 2147483300,5)"));
}
