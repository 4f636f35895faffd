use ci_shellcheck::analyzer::AnalysisFuture;
use ci_shellcheck::parser::Document;
use ci_shellcheck::{AnalysisOrchestrator, OrchestratorConfig, RawDiagnostic, ScriptAnalyzer, Severity};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Flags every blob line containing an unquoted `$` and records the flags it
/// was called with.
#[derive(Default)]
struct RecordingAnalyzer {
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptAnalyzer for RecordingAnalyzer {
    fn analyze<'a>(&'a self, snippet: &'a [u8], flags: &'a [String]) -> AnalysisFuture<'a> {
        Box::pin(async move {
            let text = String::from_utf8_lossy(snippet).to_string();
            self.calls
                .lock()
                .unwrap()
                .push((text.clone(), flags.to_vec()));

            Ok(text
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(" $"))
                .map(|(i, _)| RawDiagnostic::new("info", 2086, i + 1, "Double quote to prevent globbing"))
                .collect())
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

const PIPELINE: &str = r#"variables:
  TARGET: prod

build:
  before_script:
    - cd $CI_PROJECT_DIR
  script:
    - make all
    - |
      if [ -n "$TARGET" ]; then

        echo $TARGET
      fi

test:
  script:
    - cargo test
  after_script:
    - rm -rf $CACHE_DIR

lint:
  stage: test
"#;

#[tokio::test]
async fn findings_are_mapped_back_to_the_document() {
    let analyzer = Arc::new(RecordingAnalyzer::default());
    let orchestrator = AnalysisOrchestrator::new(
        analyzer.clone(),
        OrchestratorConfig::new(".gitlab-ci.yml").with_flags(["--exclude=SC1091"]),
    );

    let doc = Document::parse(PIPELINE).unwrap();
    let report = orchestrator.check_document(&doc).await.unwrap().sorted();

    assert_eq!(report.jobs_analyzed, 2);
    assert!(report.failed_jobs.is_empty());

    let mapped: Vec<_> = report
        .findings
        .iter()
        .map(|f| (f.line, f.message.as_str(), f.severity))
        .collect();

    // `echo $TARGET` is the fourth blob line and sits on line 12 of the file
    assert_eq!(
        mapped,
        vec![
            (6, "[build:before_script:1] Double quote to prevent globbing", Severity::Info),
            (12, "[build:script:4] Double quote to prevent globbing", Severity::Info),
            (19, "[test:after_script:1] Double quote to prevent globbing", Severity::Info),
        ]
    );

    let calls = analyzer.calls.lock().unwrap();
    // build: before_script + script, test: script + after_script
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|(_, flags)| flags == &vec!["--exclude=SC1091".to_string()]));
    assert!(calls
        .iter()
        .any(|(blob, _)| blob == "make all\nif [ -n \"$TARGET\" ]; then\n\n  echo $TARGET\nfi\n"));
}

#[tokio::test]
async fn findings_carry_the_configured_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", PIPELINE).unwrap();

    let doc = Document::load(file.path()).unwrap();
    let orchestrator = AnalysisOrchestrator::new(
        Arc::new(RecordingAnalyzer::default()),
        OrchestratorConfig::new(file.path()),
    );

    let report = orchestrator.check_document(&doc).await.unwrap();

    assert_eq!(report.findings.len(), 3);
    assert!(report.findings.iter().all(|f| f.file == file.path()));
}

#[tokio::test]
async fn document_without_scripts_produces_nothing() {
    let analyzer = Arc::new(RecordingAnalyzer::default());
    let orchestrator =
        AnalysisOrchestrator::new(analyzer.clone(), OrchestratorConfig::new(".gitlab-ci.yml"));

    let doc = Document::parse("lint:\n  stage: test\n  script: []\n").unwrap();
    let report = orchestrator.check_document(&doc).await.unwrap();

    assert!(report.is_clean());
    assert_eq!(report.jobs_analyzed, 0);
    assert!(analyzer.calls.lock().unwrap().is_empty());
}
