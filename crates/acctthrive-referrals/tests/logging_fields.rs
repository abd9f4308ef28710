use std::io;
use std::sync::{Arc, Mutex};

use acctthrive_model::{ProgramConfig, Usd, UserId};
use acctthrive_referrals::{CountingEntropy, ManualClock, ReferralService};
use acctthrive_store::MemoryStore;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn json_lines(sink: &SharedBuffer) -> Vec<serde_json::Value> {
    let bytes = sink.0.lock().expect("lock output").clone();
    let text = String::from_utf8(bytes).expect("utf8 log output");
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("json log line"))
        .collect()
}

fn message_of(line: &serde_json::Value) -> Option<&str> {
    line.get("fields")?.get("message")?.as_str()
}

#[test]
fn qualification_and_rejection_are_logged_with_fields() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut svc = ReferralService::open(
            MemoryStore::new(),
            ManualClock::default(),
            CountingEntropy::default(),
            ProgramConfig::default(),
        )
        .expect("open");
        let referrer = UserId::parse("user_123").expect("referrer");
        let referred = UserId::parse("user_456").expect("referred");
        let code = svc
            .get_or_create_account(&referrer)
            .expect("create")
            .code
            .to_string();
        assert!(!svc.record_referral("NOTACODE", &referred).expect("reject"));
        assert!(svc.record_referral(&code, &referred).expect("refer"));
        assert!(svc
            .process_deposit(&referred, Usd::from_dollars(25))
            .expect("deposit"));
    });

    let lines = json_lines(&sink);
    let rejected = lines
        .iter()
        .find(|l| message_of(l) == Some("referral rejected"))
        .expect("rejection line");
    assert_eq!(rejected.get("level").and_then(|v| v.as_str()), Some("WARN"));
    assert_eq!(
        rejected["fields"].get("reason").and_then(|v| v.as_str()),
        Some("unknown_code")
    );

    let qualified = lines
        .iter()
        .find(|l| message_of(l) == Some("referral qualified"))
        .expect("qualification line");
    assert_eq!(qualified.get("level").and_then(|v| v.as_str()), Some("INFO"));
    let fields = &qualified["fields"];
    assert_eq!(fields.get("relationship").and_then(|v| v.as_str()), Some("rec_1"));
    assert_eq!(fields.get("bonus_usd").and_then(|v| v.as_str()), Some("0.65"));
    assert_eq!(fields.get("referrer_id").and_then(|v| v.as_str()), Some("user_123"));

    assert!(lines
        .iter()
        .all(|l| message_of(l) != Some("referral recorded")));
}
