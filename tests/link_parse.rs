use qsolink::{
    link::{
        params::{LinkRefs, ParsedLink, RefPair},
        parser::{parse, try_parse, LinkError, Side},
    },
    registry::ActivationCode,
    types::LINK_PREFIX,
};

fn link(query: &str) -> String {
    format!("{LINK_PREFIX}qso?{query}")
}

#[test]
fn parses_hunting_link() {
    let parsed = parse(&link(
        "theirCall=K6TEST&theirRef=W6/CT-006&theirSig=sota&freq=14285000&mode=CW",
    ))
    .expect("valid");

    assert_eq!(
        parsed,
        ParsedLink {
            refs: LinkRefs::Theirs(RefPair::new("W6/CT-006", ActivationCode::Sota)),
            freq: Some(14_285_000),
            mode: Some("CW".to_string()),
            time: None,
            my_call: None,
            their_call: Some("K6TEST".to_string()),
        }
    );
    assert_eq!(parsed.my_ref(), None);
    assert_eq!(parsed.my_sig(), None);
}

#[test]
fn parses_both_pairs() {
    let parsed = parse(&link(
        "myRef=K-1234&mySig=pota&theirRef=VK3/VE-001&theirSig=sota&myCall=n0call&time=1700000000000",
    ))
    .expect("valid");

    assert_eq!(parsed.my_ref(), Some("K-1234"));
    assert_eq!(parsed.my_sig(), Some(ActivationCode::Pota));
    assert_eq!(parsed.their_ref(), Some("VK3/VE-001"));
    assert_eq!(parsed.their_sig(), Some(ActivationCode::Sota));
    assert_eq!(parsed.my_call.as_deref(), Some("N0CALL"));
    assert_eq!(parsed.time, Some(1_700_000_000_000));
}

#[test]
fn rejects_other_schemes() {
    for url in [
        "https://qso?theirRef=X&theirSig=sota",
        "qso?theirRef=X&theirSig=sota",
        "",
        "COM.HAM2K.POLO://qso?theirRef=X&theirSig=sota",
    ] {
        assert_eq!(parse(url), None, "{url}");
    }
    assert_eq!(try_parse("https://example.com"), Err(LinkError::NotOurScheme));
}

#[test]
fn rejects_missing_query() {
    assert_eq!(try_parse(&format!("{LINK_PREFIX}qso")), Err(LinkError::MissingQuery));
    assert_eq!(try_parse(LINK_PREFIX), Err(LinkError::MissingQuery));
}

#[test]
fn rejects_incomplete_pairs() {
    assert_eq!(parse(&link("myRef=W6/CT-006")), None);
    assert_eq!(
        try_parse(&link("myRef=W6/CT-006")),
        Err(LinkError::IncompletePair(Side::Mine))
    );
    assert_eq!(
        try_parse(&link("theirSig=pota")),
        Err(LinkError::IncompletePair(Side::Theirs))
    );
    // A complete pair does not rescue a half-specified one.
    assert_eq!(
        try_parse(&link("theirRef=K-0001&theirSig=pota&myRef=W6/CT-006")),
        Err(LinkError::IncompletePair(Side::Mine))
    );
}

#[test]
fn rejects_links_without_any_pair() {
    assert_eq!(try_parse(&link("")), Err(LinkError::NoPair));
    assert_eq!(try_parse(&link("theirCall=K6TEST&freq=14285000")), Err(LinkError::NoPair));
}

#[test]
fn rejects_unknown_sig_even_when_other_pair_is_valid() {
    assert_eq!(
        try_parse(&link("theirRef=W6/CT-006&theirSig=sota&mySig=iota")),
        Err(LinkError::UnknownCode {
            side: Side::Mine,
            code: "iota".to_string(),
        })
    );
    assert_eq!(
        try_parse(&link("myRef=K-1234&mySig=pota&theirRef=X&theirSig=BOTA")),
        Err(LinkError::UnknownCode {
            side: Side::Theirs,
            code: "bota".to_string(),
        })
    );
}

#[test]
fn normalizes_case_but_preserves_references() {
    let parsed = parse(&link(
        "myRef=k-1234&mySig=PoTa&theirRef=w6/ct-006&theirSig=SOTA&mode=ssb&myCall=n0call&theirCall=k6Test",
    ))
    .expect("valid");

    assert_eq!(parsed.my_ref(), Some("k-1234"));
    assert_eq!(parsed.their_ref(), Some("w6/ct-006"));
    assert_eq!(parsed.my_sig(), Some(ActivationCode::Pota));
    assert_eq!(parsed.their_sig(), Some(ActivationCode::Sota));
    assert_eq!(parsed.mode.as_deref(), Some("SSB"));
    assert_eq!(parsed.my_call.as_deref(), Some("N0CALL"));
    assert_eq!(parsed.their_call.as_deref(), Some("K6TEST"));
}

#[test]
fn percent_decodes_values() {
    let parsed = parse(&link("theirRef=W6%2FCT-006&theirSig=sota&mode=FT8&theirCall=k6test%2Fp"))
        .expect("valid");
    assert_eq!(parsed.their_ref(), Some("W6/CT-006"));
    assert_eq!(parsed.their_call.as_deref(), Some("K6TEST/P"));
}

#[test]
fn first_occurrence_of_repeated_key_wins() {
    let parsed = parse(&link("theirRef=FIRST&theirRef=SECOND&theirSig=wwff&mode=cw&mode=ssb"))
        .expect("valid");
    assert_eq!(parsed.their_ref(), Some("FIRST"));
    assert_eq!(parsed.mode.as_deref(), Some("CW"));
}

#[test]
fn invalid_freq_and_time_are_dropped_not_fatal() {
    for freq in ["abc", "14.2", "-14000000", "0", ""] {
        let parsed = parse(&link(&format!("theirRef=X&theirSig=gma&freq={freq}"))).expect("valid");
        assert_eq!(parsed.freq, None, "{freq}");
    }

    let parsed = parse(&link("theirRef=X&theirSig=gma&time=yesterday")).expect("valid");
    assert_eq!(parsed.time, None);

    let parsed = parse(&link("theirRef=X&theirSig=gma&time=-5")).expect("valid");
    assert_eq!(parsed.time, Some(-5));
}

#[test]
fn empty_values_count_as_absent() {
    let parsed = parse(&link("theirRef=X&theirSig=wca&mySig=&myRef=&mode=")).expect("valid");
    assert_eq!(parsed.refs, LinkRefs::Theirs(RefPair::new("X", ActivationCode::Wca)));
    assert_eq!(parsed.mode, None);
}

#[test]
fn ignores_unknown_keys_and_path() {
    let parsed = parse(&format!("{LINK_PREFIX}anything?theirRef=ZL1/AK-001&theirSig=zlota&foo=bar"))
        .expect("valid");
    assert_eq!(parsed.their_sig(), Some(ActivationCode::Zlota));
}

#[test]
fn invalid_utf8_escapes_reject_the_link() {
    assert_eq!(try_parse(&link("theirRef=W6%FF&theirSig=sota")), Err(LinkError::Malformed));
    assert_eq!(
        parse(&link("theirRef=W6%FF%FECT&theirSig=sota&theirCall=K6%C3")),
        None
    );
    // Even an otherwise ignored key must decode.
    assert_eq!(
        try_parse(&link("theirRef=X&theirSig=sota&note=%E2%82")),
        Err(LinkError::Malformed)
    );
}

#[test]
fn plus_decodes_to_space_and_valid_multibyte_escapes_survive() {
    let parsed = parse(&link("theirRef=Mt+Hood%C3%A9&theirSig=sota")).expect("valid");
    assert_eq!(parsed.their_ref(), Some("Mt Hoodé"));
}
