/*!
 * Tests for invocations and the mock process runner
 */

use podtagger::process::mock::MockReply;
use podtagger::process::{Invocation, MockRunner, ProcessOutput, ProcessRunner, shell_quote};

/// Test that invocations render flags bare and quote everything else
#[test]
fn test_invocation_display_shouldQuoteNonFlags() {
    let invocation = Invocation::new("/bin/tool")
        .arg("-D")
        .args(["--TIT2", "Say \"hi\""]);

    assert_eq!(invocation.to_string(), "\"/bin/tool\" -D --TIT2 \"Say \\\"hi\\\"\"");
}

/// Test that a flag with whitespace is quoted
#[test]
fn test_shell_quote_withSpacedFlag_shouldQuote() {
    assert_eq!(shell_quote("-a b"), "\"-a b\"");
    assert_eq!(shell_quote("-v"), "-v");
    assert_eq!(shell_quote("C:\\path"), "\"C:\\\\path\"");
}

/// Test that unscripted programs follow the fallback behavior
#[test]
fn test_mock_runner_withFallbacks_shouldFollowBehavior() {
    let call = Invocation::new("anything");

    assert!(MockRunner::working().run(&call).unwrap().is_success());
    assert_eq!(MockRunner::failing(3).run(&call).unwrap().code, Some(3));
    assert!(MockRunner::missing().run(&call).is_err());
}

/// Test that scripted replies are consumed in order and the last repeats
#[test]
fn test_mock_runner_withQueuedReplies_shouldRepeatLast() {
    let runner = MockRunner::missing()
        .stdout("probe", "first")
        .reply("probe", MockReply::Output(ProcessOutput::failure(1, "second")));
    let call = Invocation::new("/usr/bin/probe");

    assert_eq!(runner.run(&call).unwrap().stdout, "first");
    assert_eq!(runner.run(&call).unwrap().stderr, "second");
    assert_eq!(runner.run(&call).unwrap().stderr, "second");
    assert!(runner.run(&Invocation::new("other")).is_err());
}

/// Test that every call is recorded, matched by file name
#[test]
fn test_mock_runner_calls_shouldRecordInvocations() {
    let runner = MockRunner::working();
    let by_ref = &runner;

    by_ref.run(&Invocation::new("/a/tagger").arg("x")).unwrap();
    runner.run(&Invocation::new("probe")).unwrap();

    assert_eq!(runner.calls().len(), 2);
    let tagger_calls = runner.calls_to("tagger");
    assert_eq!(tagger_calls.len(), 1);
    assert_eq!(tagger_calls[0].args_lossy(), ["x"]);
}

/// Test a not-found reply for a specific program
#[test]
fn test_mock_runner_withNotFoundReply_shouldFailToStart() {
    let runner = MockRunner::working().reply("mdls", MockReply::NotFound);

    let err = runner.run(&Invocation::new("mdls")).unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
