use ci_shellcheck::analyzer::{assemble, translate};
use ci_shellcheck::{JobScripts, LineNode, RawDiagnostic, ScriptKey, Severity};
use std::collections::HashSet;
use std::path::Path;

#[test]
fn build_job_warning_maps_to_source_line() {
    let job = JobScripts::new("build").with_part(
        ScriptKey::Script,
        vec![LineNode::new(10, "echo $X"), LineNode::new(11, "ls -l")],
    );
    let snippet = assemble(&job, &[ScriptKey::Script]);
    let diagnostic = RawDiagnostic::new("warning", 2086, 1, "Double quote to prevent globbing");

    let finding = translate(
        &diagnostic,
        &snippet.index,
        &job.job_name,
        ScriptKey::Script,
        Path::new(".gitlab-ci.yml"),
    )
    .expect("line 1 is inside the index");

    assert_eq!(finding.severity, Severity::Warning);
    assert_eq!(finding.code, "SC-2086");
    assert_eq!(finding.line, 10);
    assert!(finding.message.contains("build"));
    assert!(finding.message.contains("script"));
    assert!(finding.message.contains(":1]"));
    assert!(finding.message.contains("Double quote to prevent globbing"));
    assert_eq!(finding.link, "https://www.shellcheck.net/wiki/SC2086");
}

#[test]
fn severity_mapping_is_total_and_distinct() {
    let known: Vec<_> = ["error", "warning", "info", "style"]
        .iter()
        .map(|level| Severity::from_level(level))
        .collect();
    let ordinals: HashSet<_> = known.iter().map(Severity::ordinal).collect();
    assert_eq!(ordinals.len(), 4);

    assert!(known.windows(2).all(|pair| pair[0] > pair[1]));

    for level in ["", "fatal", "Warning", "note", "errors", "💥"] {
        let severity = Severity::from_level(level);
        assert_eq!(severity, Severity::Unknown);
        assert!(!ordinals.contains(&severity.ordinal()));
        assert!(known.iter().all(|k| severity < *k));
    }
}

#[test]
fn translation_is_deterministic() {
    let job = JobScripts::new("lint").with_part(
        ScriptKey::AfterScript,
        vec![LineNode::new(40, "rm $TMP\nrm -rf /$DIR")],
    );
    let snippet = assemble(&job, &[ScriptKey::AfterScript]);
    let diagnostics = vec![
        RawDiagnostic::new("warning", 2086, 1, "Double quote"),
        RawDiagnostic::new("error", 2115, 2, "Use \"${var:?}\" to ensure this never expands to /"),
    ];

    let run = || {
        diagnostics
            .iter()
            .map(|d| {
                translate(d, &snippet.index, "lint", ScriptKey::AfterScript, Path::new("ci.yml"))
                    .unwrap()
            })
            .collect::<Vec<_>>()
    };

    let first = run();
    assert_eq!(first, run());
    assert_eq!(first[1].line, 40);
    assert_eq!(first[1].severity, Severity::Error);
}
