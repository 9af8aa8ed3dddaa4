use async_trait::async_trait;
use docsage_core::config::SessionConfig;
use docsage_core::transcript::Sender;
use docsage_core::{ActionKind, AgentError, AnalysisAgent, SessionController};
use std::sync::{Arc, Mutex};

/// Agent that echoes what it was called with, so tests can check that the
/// session passes inputs through untouched.
#[derive(Default)]
struct EchoAgent {
    seen_payloads: Mutex<Vec<String>>,
}

impl EchoAgent {
    fn record(&self, payload: &str) {
        self.seen_payloads.lock().unwrap().push(payload.to_string());
    }
}

#[async_trait]
impl AnalysisAgent for EchoAgent {
    async fn summarize(&self, payload: &str, document_name: &str) -> Result<String, AgentError> {
        self.record(payload);
        Ok(format!("summary of {document_name}"))
    }

    async fn answer_question(&self, question: &str, payload: &str) -> Result<String, AgentError> {
        self.record(payload);
        Ok(format!("answer to {question}"))
    }

    async fn analyze_risks(&self, payload: &str) -> Result<String, AgentError> {
        self.record(payload);
        Err(AgentError::EmptyResponse)
    }

    async fn define_term(&self, term: &str, payload: &str) -> Result<String, AgentError> {
        self.record(payload);
        Ok(format!("definition of {term}"))
    }
}

#[tokio::test]
async fn test_full_session_walkthrough() {
    let agent = Arc::new(EchoAgent::default());
    let session = SessionController::new(agent.clone(), SessionConfig::default());

    let lease = session.add_document("lease.pdf", "data:application/pdf;base64,U1");
    let nda = session.add_document("nda.txt", "data:text/plain;base64,TkRB");
    assert!(lease.id < nda.id);

    session.select_document(lease.id).unwrap();
    session.request_summary().await.unwrap();
    session.send_question("Who pays utilities?").await.unwrap();
    let risks = session.request_risks().await.unwrap();
    session.define_term("holdover").await.unwrap();

    assert_eq!(risks.kind(), ActionKind::Risks);
    assert!(risks.error().is_some());

    let snapshot = session.snapshot();
    assert_eq!(snapshot.selected_document.as_ref().map(|d| d.id), Some(lease.id));
    assert!(!snapshot.is_busy());

    let senders: Vec<_> = snapshot.transcript.iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![
            Sender::Ai,
            Sender::User,
            Sender::Ai,
            Sender::Ai,
            Sender::User,
            Sender::Ai
        ]
    );
    assert!(snapshot.transcript[0].content.contains("summary of lease.pdf"));
    assert_eq!(snapshot.transcript[2].content, "answer to Who pays utilities?");
    assert_eq!(snapshot.transcript[5].content, "definition of holdover");
    assert!(
        snapshot
            .transcript
            .windows(2)
            .all(|pair| pair[0].id < pair[1].id)
    );

    let payloads = agent.seen_payloads.lock().unwrap().clone();
    assert_eq!(payloads.len(), 4);
    assert!(payloads.iter().all(|p| p == "data:application/pdf;base64,U1"));

    session.select_document(nda.id).unwrap();
    assert!(session.snapshot().transcript.is_empty());
}

#[tokio::test]
async fn test_snapshot_serializes_for_the_frontend() {
    let session = SessionController::new(Arc::new(EchoAgent::default()), SessionConfig::default());
    let doc = session.add_document("lease.pdf", "U1");
    session.select_document(doc.id).unwrap();
    session.on_citation_click().unwrap();

    let json = serde_json::to_value(session.snapshot()).unwrap();

    assert_eq!(json["selectedDocument"]["name"], "lease.pdf");
    assert_eq!(json["highlight"]["documentId"], doc.id.0);
    assert!(json["highlight"].get("document_id").is_none());
    assert!(json["activeAction"].is_null());
    assert!(json["transcript"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_events_use_camel_case_fields() {
    let session = SessionController::new(Arc::new(EchoAgent::default()), SessionConfig::default());
    let mut events = session.subscribe();
    let doc = session.add_document("lease.pdf", "U1");
    session.select_document(doc.id).unwrap();
    session.define_term("lien").await.unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(serde_json::to_value(&event).unwrap());
    }

    assert_eq!(seen[0]["type"], "document_added");
    assert_eq!(seen[0]["documentId"], doc.id.0);
    assert_eq!(seen[1]["type"], "document_selected");
    assert_eq!(seen[1]["documentId"], doc.id.0);

    let started = seen
        .iter()
        .find(|event| event["type"] == "action_started")
        .unwrap();
    assert_eq!(started["action"]["documentId"], doc.id.0);
    assert_eq!(started["action"]["kind"], "jargon");
    assert!(started["action"]["startedAt"].is_string());
    assert!(started["action"].get("started_at").is_none());
}
