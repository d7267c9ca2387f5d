// Mock engine adapter - Scriptable in-process engine used by tests and dry runs

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Mutex as JobLock, Notify};

use crate::domain::errors::*;
use crate::ports::*;

/// Minimal GIF89a header used as the default engine output
pub const GIF_SIGNATURE: &[u8] = b"GIF89a";

/// Engine double that records every call
pub struct MockEngineAdapter {
    gated: bool,
    gate: Notify,
    run_gated: bool,
    run_gate: Notify,
    load_calls: AtomicUsize,
    fail_load: Option<String>,
    fail_run: Option<String>,
    output: Vec<u8>,
    echo_input: bool,
    jobs: JobLock<()>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    runs: Mutex<Vec<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockEngineAdapter {
    /// Engine whose `load` resolves immediately
    pub fn new() -> Self {
        Self {
            gated: false,
            gate: Notify::new(),
            run_gated: false,
            run_gate: Notify::new(),
            load_calls: AtomicUsize::new(0),
            fail_load: None,
            fail_run: None,
            output: GIF_SIGNATURE.to_vec(),
            echo_input: false,
            jobs: JobLock::new(()),
            files: Mutex::new(HashMap::new()),
            runs: Mutex::new(Vec::new()),
        }
    }

    /// Hold `load` until `release_load` is called
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Hold `run` until `release_run` is called
    pub fn gated_run(mut self) -> Self {
        self.run_gated = true;
        self
    }

    /// Make `load` fail with `reason`
    pub fn failing_load(mut self, reason: &str) -> Self {
        self.fail_load = Some(reason.to_string());
        self
    }

    /// Make `run` fail with `reason`
    pub fn failing_run(mut self, reason: &str) -> Self {
        self.fail_run = Some(reason.to_string());
        self
    }

    /// Bytes reported as the output file after a run
    pub fn with_output(mut self, bytes: Vec<u8>) -> Self {
        self.output = bytes;
        self
    }

    /// Copy the `-i` input to the output instead of using fixed bytes
    pub fn echo_input(mut self) -> Self {
        self.echo_input = true;
        self
    }

    pub fn release_load(&self) {
        self.gate.notify_one();
    }

    pub fn release_run(&self) {
        self.run_gate.notify_one();
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Argument lists passed to `run`, in call order
    pub fn runs(&self) -> Vec<Vec<String>> {
        lock(&self.runs).clone()
    }

    pub fn input(&self, name: &str) -> Option<Vec<u8>> {
        lock(&self.files).get(name).cloned()
    }
}

impl Default for MockEngineAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversionEnginePort for MockEngineAdapter {
    async fn load(&self) -> Result<(), DomainError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.gated {
            self.gate.notified().await;
        }
        match &self.fail_load {
            Some(reason) => Err(DomainError::EngineFailure(reason.clone())),
            None => Ok(()),
        }
    }

    async fn write_input(&self, name: &str, bytes: Vec<u8>) -> Result<(), DomainError> {
        lock(&self.files).insert(name.to_string(), bytes);
        Ok(())
    }

    async fn run(&self, args: &[String]) -> Result<(), DomainError> {
        lock(&self.runs).push(args.to_vec());
        if self.run_gated {
            self.run_gate.notified().await;
        }
        if let Some(reason) = &self.fail_run {
            return Err(DomainError::EngineFailure(reason.clone()));
        }

        // The output file name is the last argument
        let Some(output_name) = args.last() else {
            return Ok(());
        };
        let mut files = lock(&self.files);
        let output = if self.echo_input {
            let input = args
                .iter()
                .position(|arg| arg == "-i")
                .and_then(|i| args.get(i + 1))
                .and_then(|name| files.get(name).cloned());
            input.ok_or_else(|| DomainError::EngineFailure("No input file".to_string()))?
        } else {
            self.output.clone()
        };
        files.insert(output_name.clone(), output);
        Ok(())
    }

    async fn read_output(&self, name: &str) -> Result<Vec<u8>, DomainError> {
        lock(&self.files)
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::EngineFailure(format!("No such file: {}", name)))
    }

    fn job_lock(&self) -> &JobLock<()> {
        &self.jobs
    }
}
