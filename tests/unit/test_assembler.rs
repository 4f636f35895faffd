use ci_shellcheck::analyzer::assemble;
use ci_shellcheck::{JobScripts, LineNode, ScriptKey};

/// Expected (blob line -> source line) pairs, written out by hand.
fn expected_lines(job: &JobScripts, keys: &[ScriptKey]) -> Vec<usize> {
    keys.iter()
        .flat_map(|key| job.part(*key))
        .flat_map(|node| {
            let text = node.text().strip_suffix('\n').unwrap_or(node.text());
            std::iter::repeat(node.line()).take(text.split('\n').count())
        })
        .collect()
}

fn job() -> JobScripts {
    JobScripts::new("release")
        .with_part(
            ScriptKey::BeforeScript,
            vec![LineNode::new(4, "set -eu"), LineNode::new(5, "cd \"$DIR\"")],
        )
        .with_part(
            ScriptKey::Script,
            vec![
                LineNode::new(8, "build.sh"),
                LineNode::new(9, "case $1 in\n  a) echo a ;;\n\n  *) echo b ;;\nesac\n"),
                LineNode::new(15, ""),
                LineNode::new(16, "publish $TAG"),
            ],
        )
        .with_part(ScriptKey::AfterScript, vec![])
}

#[test]
fn every_blob_line_maps_to_its_source_node() {
    let job = job();

    for keys in [
        vec![ScriptKey::Script],
        vec![ScriptKey::BeforeScript, ScriptKey::Script],
        vec![ScriptKey::Script, ScriptKey::BeforeScript, ScriptKey::AfterScript],
    ] {
        let snippet = assemble(&job, &keys);
        let mapped: Vec<_> = snippet.index.iter().map(LineNode::line).collect();

        assert_eq!(mapped, expected_lines(&job, &keys));
        assert_eq!(snippet.blob.lines().count(), snippet.index.len());

        for (k, blob_line) in snippet.blob.lines().enumerate() {
            let node = snippet.index.get(k + 1).expect("index covers every blob line");
            assert!(
                node.text().split('\n').any(|line| line == blob_line),
                "blob line {} ({:?}) does not come from node at line {}",
                k + 1,
                blob_line,
                node.line()
            );
        }
    }
}

#[test]
fn empty_scalar_still_occupies_a_blob_line() {
    let snippet = assemble(&job(), &[ScriptKey::Script]);
    let lines: Vec<_> = snippet.blob.lines().collect();

    assert_eq!(lines[6], "");
    assert_eq!(snippet.index.get(7).map(LineNode::line), Some(15));
    assert_eq!(snippet.index.get(8).map(LineNode::line), Some(16));
}

#[test]
fn job_with_only_empty_fields_assembles_to_nothing() {
    let job = JobScripts::new("noop").with_part(ScriptKey::Script, vec![]);
    let snippet = assemble(&job, &ScriptKey::ALL);

    assert!(snippet.is_empty());
    assert!(snippet.blob.is_empty());
}
