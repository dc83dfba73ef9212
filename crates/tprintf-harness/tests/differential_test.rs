//! Differential integration test: engine vs host libc snprintf.
//!
//! Run: cargo test -p tprintf-harness --test differential_test

use tprintf_harness::{
    CampaignConfig, Case, OwnedValue, host_render_full, host_snprintf, run_campaign, run_case,
};

#[test]
fn oracle_smoke() {
    let out = host_snprintf(16, b"%d", &[OwnedValue::I32(123)]).unwrap();
    assert_eq!(out.stored, b"123");
    assert_eq!(out.logical, 3);
}

#[test]
fn oracle_full_render_is_untruncated() {
    let out = host_render_full(
        b"[%10s|%-10s]",
        &[
            OwnedValue::Str(b"right".to_vec()),
            OwnedValue::Str(b"left".to_vec()),
        ],
    )
    .unwrap();
    assert_eq!(out, b"[     right|left      ]");
}

#[test]
fn hand_picked_edge_cases_match_host() {
    let cases: &[(&[u8], Vec<OwnedValue>)] = &[
        (b"%.0d", vec![OwnedValue::I32(0)]),
        (b"%05d", vec![OwnedValue::I32(-3)]),
        (b"%010.5d", vec![OwnedValue::I32(-59)]),
        (b"% .3x", vec![OwnedValue::U32(0xAB)]),
        (b"%*d", vec![OwnedValue::I32(-8), OwnedValue::I32(42)]),
        (
            b"%*.*d",
            vec![OwnedValue::I32(10), OwnedValue::I32(-5), OwnedValue::I32(7)],
        ),
        (b"%+lld", vec![OwnedValue::I64(i64::MIN)]),
        (b"%hhu", vec![OwnedValue::U8(200)]),
        (b"%.d", vec![OwnedValue::I32(0)]),
        (b"%-12.4s|", vec![OwnedValue::Str(b"truncate me".to_vec())]),
        (b"100%% done", vec![]),
    ];
    for (template, args) in cases {
        let case = Case {
            index: 0,
            template: template.to_vec(),
            args: args.clone(),
        };
        assert_eq!(
            run_case(&case, 4096),
            Ok(()),
            "template {:?}",
            String::from_utf8_lossy(template)
        );
    }
}

#[test]
fn seeded_campaign_matches_host_everywhere() {
    let config = CampaignConfig {
        seed: 0xDEAD_BEEF,
        cases: 500,
        ample_capacity: 4096,
    };
    let result = run_campaign(&config);
    assert_eq!(result.total, 500);
    assert!(
        result.failures.is_empty(),
        "first failure: {:?}",
        result.failures.first()
    );
}

#[test]
fn campaigns_are_reproducible() {
    let config = CampaignConfig {
        seed: 0xF00D,
        cases: 50,
        ample_capacity: 4096,
    };
    assert_eq!(run_campaign(&config), run_campaign(&config));
}
