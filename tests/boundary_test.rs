// tests/boundary_test.rs
use git_versioner::boundary::BoundaryWarning;

#[test]
fn test_malformed_tag_message() {
    let warning = BoundaryWarning::MalformedTag {
        tag: "v1.0.0".to_string(),
        kind: "tree".to_string(),
    };
    assert_eq!(
        warning.to_string(),
        "Skipping tag 'v1.0.0': it points to a tree instead of a commit"
    );
}

#[test]
fn test_unparsable_tag_message() {
    let warning = BoundaryWarning::UnparsableTag {
        tag: "v01.0.0".to_string(),
        reason: "leading zero".to_string(),
    };
    let msg = warning.to_string();
    assert!(msg.contains("v01.0.0"));
    assert!(msg.contains("leading zero"));
}

#[test]
fn test_no_matching_tag_message() {
    let warning = BoundaryWarning::NoMatchingTag { commits: 12 };
    assert!(warning.to_string().contains("12 commits"));
}

#[test]
fn test_detached_head_shortens_hash() {
    let warning = BoundaryWarning::DetachedHead {
        hash: "c9f54782bf4a4d6e2b1c0a9f8e7d6c5b4a3f2e1d".to_string(),
    };
    assert_eq!(warning.to_string(), "HEAD is detached at c9f54782");

    let short = BoundaryWarning::DetachedHead {
        hash: "abc".to_string(),
    };
    assert_eq!(short.to_string(), "HEAD is detached at abc");
}

#[test]
fn test_warning_equality() {
    assert_eq!(
        BoundaryWarning::NoMatchingTag { commits: 1 },
        BoundaryWarning::NoMatchingTag { commits: 1 }
    );
    assert_ne!(
        BoundaryWarning::NoMatchingTag { commits: 1 },
        BoundaryWarning::NoMatchingTag { commits: 2 }
    );
}
