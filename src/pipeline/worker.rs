use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use sift_stream::Latest;

use super::commands::PipelineCommand;
use super::debounce::DebounceTimer;
use crate::provider::SearchProvider;
use crate::state::{LookupError, ResultState};

/// Launches the pipeline worker thread and returns its command handle.
pub(crate) fn spawn(
    provider: Arc<dyn SearchProvider>,
    window: Duration,
    output: Arc<Latest<ResultState>>,
) -> (Sender<PipelineCommand>, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::channel();
    let worker = Worker {
        provider,
        output,
        completions: command_tx.clone(),
        debounce: DebounceTimer::new(window),
        last_forwarded: None,
        next_lookup_id: 0,
        latest_lookup_id: 0,
    };
    let handle = thread::spawn(move || worker_loop(&command_rx, worker));
    (command_tx, handle)
}

struct Worker {
    provider: Arc<dyn SearchProvider>,
    output: Arc<Latest<ResultState>>,
    /// Clone of the worker's own command sender, handed to lookup threads
    /// so completions re-enter the serialized loop.
    completions: Sender<PipelineCommand>,
    debounce: DebounceTimer,
    last_forwarded: Option<String>,
    next_lookup_id: u64,
    latest_lookup_id: u64,
}

/// Drains the command channel, waking early whenever the debounce deadline
/// expires. All state transitions happen on this one thread.
fn worker_loop(commands: &Receiver<PipelineCommand>, mut worker: Worker) {
    loop {
        let received = match worker.debounce.ready_in(Instant::now()) {
            Some(wait) => match commands.recv_timeout(wait) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match commands.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            },
        };

        match received {
            Some(PipelineCommand::Query(query)) => worker.debounce.note(query),
            Some(PipelineCommand::LookupDone { id, outcome }) => {
                worker.complete_lookup(id, outcome);
            }
            Some(PipelineCommand::Shutdown) => break,
            None => worker.flush_settled(),
        }
    }

    worker.output.close();
}

impl Worker {
    /// Forward the settled query unless it repeats the previously forwarded
    /// value.
    fn flush_settled(&mut self) {
        let Some(query) = self.debounce.fire() else {
            return;
        };
        if self.last_forwarded.as_deref() == Some(query.as_str()) {
            log::trace!("suppressing repeat of settled query {query:?}");
            return;
        }
        self.issue_lookup(query);
    }

    fn issue_lookup(&mut self, query: String) {
        self.next_lookup_id = self.next_lookup_id.saturating_add(1);
        let id = self.next_lookup_id;
        self.latest_lookup_id = id;
        self.last_forwarded = Some(query.clone());
        log::debug!("issuing lookup {id} for query {query:?}");

        let provider = Arc::clone(&self.provider);
        let completions = self.completions.clone();
        thread::spawn(move || {
            let outcome = provider.search(&query);
            let _ = completions.send(PipelineCommand::LookupDone { id, outcome });
        });
    }

    /// Publish a completed lookup unless a newer one was issued since.
    fn complete_lookup(&mut self, id: u64, outcome: Result<Vec<String>, LookupError>) {
        if id != self.latest_lookup_id {
            log::trace!("discarding superseded lookup {id}");
            return;
        }
        match outcome {
            Ok(items) => self.output.publish(ResultState::Ready(items)),
            Err(error) => {
                log::warn!("lookup {id} failed: {error}");
                self.output.publish(ResultState::Failed(error));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::mpsc::TryRecvError;

    use super::*;

    struct RecordingProvider {
        calls: Mutex<Vec<String>>,
        entries: Vec<String>,
    }

    impl RecordingProvider {
        fn new(entries: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                entries: entries.iter().map(ToString::to_string).collect(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SearchProvider for RecordingProvider {
        fn search(&self, query: &str) -> Result<Vec<String>, LookupError> {
            self.calls.lock().unwrap().push(query.to_string());
            let needle = query.to_lowercase();
            Ok(self
                .entries
                .iter()
                .filter(|entry| entry.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }
    }

    /// Resolves "a" slowly and everything else immediately, so a later
    /// query can finish first.
    struct StallingProvider;

    impl SearchProvider for StallingProvider {
        fn search(&self, query: &str) -> Result<Vec<String>, LookupError> {
            if query == "a" {
                thread::sleep(Duration::from_millis(250));
                Ok(vec!["apple".to_string()])
            } else {
                Ok(vec!["banana".to_string()])
            }
        }
    }

    struct FlakyProvider;

    impl SearchProvider for FlakyProvider {
        fn search(&self, query: &str) -> Result<Vec<String>, LookupError> {
            if query == "x" {
                Err(LookupError::new("backend down"))
            } else {
                Ok(vec![query.to_string()])
            }
        }
    }

    fn start(
        provider: Arc<dyn SearchProvider>,
        window: Duration,
    ) -> (
        Sender<PipelineCommand>,
        JoinHandle<()>,
        Arc<Latest<ResultState>>,
    ) {
        let output = Arc::new(Latest::new(ResultState::Empty));
        let (commands, handle) = spawn(provider, window, Arc::clone(&output));
        (commands, handle, output)
    }

    fn next_state(results: &Receiver<ResultState>) -> ResultState {
        results
            .recv_timeout(Duration::from_secs(2))
            .expect("timed out waiting for pipeline output")
    }

    #[test]
    fn burst_collapses_to_one_lookup_for_its_last_query() {
        let provider = Arc::new(RecordingProvider::new(&[
            "apple",
            "application",
            "banana",
        ]));
        let (commands, _handle, output) =
            start(Arc::clone(&provider) as Arc<dyn SearchProvider>, Duration::from_millis(80));
        let results = output.subscribe();
        assert_eq!(next_state(&results), ResultState::Empty);

        for query in ["a", "ap", "app"] {
            commands
                .send(PipelineCommand::Query(query.to_string()))
                .unwrap();
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(
            next_state(&results),
            ResultState::Ready(vec!["apple".to_string(), "application".to_string()])
        );
        assert_eq!(provider.calls(), ["app"]);

        commands.send(PipelineCommand::Shutdown).unwrap();
    }

    #[test]
    fn repeated_settled_query_is_looked_up_once() {
        let provider = Arc::new(RecordingProvider::new(&["apple"]));
        let (commands, _handle, output) =
            start(Arc::clone(&provider) as Arc<dyn SearchProvider>, Duration::from_millis(30));
        let results = output.subscribe();
        assert_eq!(next_state(&results), ResultState::Empty);

        commands
            .send(PipelineCommand::Query("app".to_string()))
            .unwrap();
        assert!(next_state(&results).is_ready());

        commands
            .send(PipelineCommand::Query("app".to_string()))
            .unwrap();
        thread::sleep(Duration::from_millis(150));

        assert_eq!(provider.calls(), ["app"]);
        assert_eq!(results.try_recv(), Err(TryRecvError::Empty));

        commands.send(PipelineCommand::Shutdown).unwrap();
    }

    #[test]
    fn later_lookup_supersedes_a_still_pending_one() {
        let (commands, _handle, output) =
            start(Arc::new(StallingProvider), Duration::from_millis(20));
        let results = output.subscribe();
        assert_eq!(next_state(&results), ResultState::Empty);

        commands
            .send(PipelineCommand::Query("a".to_string()))
            .unwrap();
        thread::sleep(Duration::from_millis(60));
        commands
            .send(PipelineCommand::Query("b".to_string()))
            .unwrap();

        assert_eq!(
            next_state(&results),
            ResultState::Ready(vec!["banana".to_string()])
        );

        thread::sleep(Duration::from_millis(300));
        assert_eq!(results.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(
            output.get(),
            ResultState::Ready(vec!["banana".to_string()])
        );

        commands.send(PipelineCommand::Shutdown).unwrap();
    }

    #[test]
    fn failed_lookup_publishes_error_without_wedging_the_worker() {
        let (commands, _handle, output) =
            start(Arc::new(FlakyProvider), Duration::from_millis(20));
        let results = output.subscribe();
        assert_eq!(next_state(&results), ResultState::Empty);

        commands
            .send(PipelineCommand::Query("x".to_string()))
            .unwrap();
        assert_eq!(
            next_state(&results),
            ResultState::Failed(LookupError::new("backend down"))
        );

        commands
            .send(PipelineCommand::Query("y".to_string()))
            .unwrap();
        assert_eq!(
            next_state(&results),
            ResultState::Ready(vec!["y".to_string()])
        );

        commands.send(PipelineCommand::Shutdown).unwrap();
    }

    #[test]
    fn shutdown_stops_the_worker_and_closes_the_output() {
        let (commands, handle, output) =
            start(Arc::new(StallingProvider), Duration::from_millis(20));
        let results = output.subscribe();
        assert_eq!(next_state(&results), ResultState::Empty);

        commands.send(PipelineCommand::Shutdown).unwrap();
        handle.join().unwrap();

        assert_eq!(results.recv(), Err(mpsc::RecvError));
    }
}
