use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

use audit_extract::audit::{AuditEmitter, AuditFields, AuditTrail};
use audit_extract::{
    AttributeContext, AttributeValueExtractor, AuditExtractor, AuthenticationContext,
    AuthenticationResult, AuthnFlowIdExtractor, ChildContextLookup, ErrorKind, IdpAttribute,
    Principal, RelyingPartyContext, RequestContext,
};

const FLOW_ID: &str = "mockFlowId";
const ATTRIBUTE_ID: &str = "mockAttributeId";
const ATTRIBUTE_VALUE: &str = "mockAttributeValue";

fn populated_context(request_id: &str) -> RequestContext {
    let mut ctx = RequestContext::new(request_id);
    ctx.subcontexts_mut()
        .get_or_create::<AuthenticationContext>()
        .set_result(AuthenticationResult::new(FLOW_ID, Principal::new("mockUser")));
    ctx.subcontexts_mut()
        .get_or_create::<RelyingPartyContext>()
        .subcontexts_mut()
        .get_or_create::<AttributeContext>()
        .set_unfiltered_attributes([
            IdpAttribute::new(ATTRIBUTE_ID).unwrap().with_values([ATTRIBUTE_VALUE, "mockValue2"])
        ]);
    ctx
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_logs(f: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    capture.contents()
}

#[test]
fn empty_context_yields_nothing() {
    let ctx = RequestContext::new("req-empty");

    assert!(AuthnFlowIdExtractor::new().extract(Some(&ctx)).is_empty());
    assert!(
        AttributeValueExtractor::new(ATTRIBUTE_ID)
            .unwrap()
            .extract(Some(&ctx))
            .is_empty()
    );
}

#[test]
fn populated_context_yields_values() {
    let ctx = populated_context("req-full");

    assert_eq!(AuthnFlowIdExtractor::new().extract(Some(&ctx)), [FLOW_ID]);
    assert_eq!(
        AttributeValueExtractor::new(ATTRIBUTE_ID)
            .unwrap()
            .extract(Some(&ctx)),
        [ATTRIBUTE_VALUE, "mockValue2"]
    );
    assert!(
        AttributeValueExtractor::new("otherAttributeId")
            .unwrap()
            .extract(Some(&ctx))
            .is_empty()
    );
}

#[test]
fn construction_fails_before_extraction() {
    let err = AuthnFlowIdExtractor::with_lookup::<ChildContextLookup<AuthenticationContext>>(None)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingLookupStrategy);

    let err = AttributeValueExtractor::with_lookup::<ChildContextLookup<RelyingPartyContext>>(
        None,
        Some(ATTRIBUTE_ID.to_string()),
    )
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingLookupStrategy);

    let err = AttributeValueExtractor::with_lookup(
        Some(ChildContextLookup::<RelyingPartyContext>::new()),
        None,
    )
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingAttributeId);
}

#[test]
fn missing_result_is_logged_as_warning() {
    let ctx = RequestContext::new("req-logged");

    let logs = capture_logs(|| {
        AuthnFlowIdExtractor::new().extract(Some(&ctx));
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("Could not find the AuthenticationResult"));
    assert!(logs.contains("req-logged"));
}

#[test]
fn found_flow_id_is_logged_at_debug() {
    let ctx = populated_context("req-found");

    let logs = capture_logs(|| {
        AuthnFlowIdExtractor::new().extract(Some(&ctx));
    });

    assert!(logs.contains("DEBUG"));
    assert!(logs.contains("Authentication context found, returning mockFlowId"));
}

#[test]
fn extractors_are_shareable_across_threads() {
    let flow = Arc::new(AuthnFlowIdExtractor::new());
    let attr = Arc::new(AttributeValueExtractor::new(ATTRIBUTE_ID).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let flow = Arc::clone(&flow);
            let attr = Arc::clone(&attr);
            thread::spawn(move || {
                let ctx = populated_context(&format!("req-{}", i));
                (flow.extract(Some(&ctx)), attr.extract(Some(&ctx)))
            })
        })
        .collect();

    for handle in handles {
        let (flow_ids, values) = handle.join().unwrap();
        assert_eq!(flow_ids, [FLOW_ID]);
        assert_eq!(values, [ATTRIBUTE_VALUE, "mockValue2"]);
    }
}

#[test]
fn audit_fields_assemble_and_emit_to_trail() {
    let mut fields = AuditFields::new();
    fields
        .register("AuthnFlowId", AuthnFlowIdExtractor::new())
        .unwrap()
        .register(ATTRIBUTE_ID, AttributeValueExtractor::new(ATTRIBUTE_ID).unwrap())
        .unwrap();

    let trail = Arc::new(AuditTrail::new());
    let emitter = AuditEmitter::with_trail(Arc::clone(&trail));

    let populated = populated_context("req-a");
    let empty = RequestContext::new("req-b");

    let logs = capture_logs(|| {
        emitter.emit(&fields.assemble(Some(&populated)));
        emitter.emit(&fields.assemble(Some(&empty)));
    });

    let records = trail.records();
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].to_string(),
        "AuthnFlowId=mockFlowId|mockAttributeId=mockAttributeValue,mockValue2"
    );
    assert_eq!(records[1].to_string(), "AuthnFlowId=|mockAttributeId=");
    assert_eq!(records[1].request_id(), Some("req-b"));
    assert_eq!(trail.for_request("req-a"), records[..1]);

    assert!(logs.contains("INFO"));
    assert!(logs.contains("AuthnFlowId=mockFlowId"));
}

#[test]
fn one_emitter_serves_concurrent_requests() {
    let mut fields = AuditFields::new();
    fields
        .register("AuthnFlowId", AuthnFlowIdExtractor::new())
        .unwrap();
    let fields = Arc::new(fields);

    let trail = Arc::new(AuditTrail::new());
    let emitter = AuditEmitter::with_trail(Arc::clone(&trail));

    thread::scope(|scope| {
        for i in 0..8 {
            let fields = Arc::clone(&fields);
            let emitter = emitter.clone();
            scope.spawn(move || {
                let ctx = populated_context(&format!("req-{}", i));
                emitter.emit(&fields.assemble(Some(&ctx)));
            });
        }
    });

    assert_eq!(trail.len(), 8);
    for i in 0..8 {
        let records = trail.for_request(&format!("req-{}", i));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].to_string(), "AuthnFlowId=mockFlowId");
    }
}
