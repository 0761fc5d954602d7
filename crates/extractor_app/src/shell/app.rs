use std::collections::VecDeque;
use std::io::Write;

use anyhow::{bail, Context, Result};
use extractor_core::{update, AppState, AppViewModel, Msg, NotificationKind, SelectionSource};
use extractor_engine::{ensure_output_dir, ArtifactWriter, EngineHandle};
use extractor_logging::{extractor_debug, extractor_info};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::cli::Cli;
use super::config::ClientConfig;
use super::effects::{select_paths, EffectRunner};
use super::ui::commands::{parse_command, Command, RemoveTarget, HELP_TEXT};
use super::ui::render::{render, render_list, render_status, OutputLine};

/// Runs the shell (or the one-shot script with `--run`). Returns `false`
/// when an error notification was shown during a one-shot run.
pub async fn run(cli: Cli, config: ClientConfig) -> Result<bool> {
    ensure_output_dir(&config.output_dir)
        .with_context(|| format!("output directory {}", config.output_dir.display()))?;
    let engine = EngineHandle::new(config.service_settings())
        .context("failed to set up the service client")?;
    let runner = EffectRunner::new(engine, ArtifactWriter::new(config.output_dir.clone()));
    extractor_info!(
        "Client started base_url={} output_dir={:?}",
        config.base_url,
        config.output_dir
    );

    let mut shell = Shell::new(runner);
    if cli.run {
        if cli.files.is_empty() {
            bail!("--run needs at least one file");
        }
        let mut script = vec![Command::Add(cli.files.clone()), Command::Submit];
        if cli.download {
            script.push(Command::Download);
        }
        return Ok(shell.run_script(script).await);
    }

    if !cli.files.is_empty() {
        shell.execute(Command::Add(cli.files.clone()));
    }
    shell.run_interactive().await?;
    Ok(true)
}

struct Shell {
    state: AppState,
    last_view: AppViewModel,
    runner: EffectRunner,
    errors_shown: usize,
}

impl Shell {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        let last_view = state.view();
        Self {
            state,
            last_view,
            runner,
            errors_shown: 0,
        }
    }

    async fn run_interactive(&mut self) -> Result<()> {
        print_lines(&[OutputLine::Out(
            "Type `help` for commands, `quit` to leave.".to_string(),
        )]);
        let mut input = BufReader::new(tokio::io::stdin()).lines();
        prompt();

        loop {
            tokio::select! {
                line = input.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        extractor_debug!("Input closed");
                        return Ok(());
                    };
                    match parse_command(&line) {
                        Ok(Some(Command::Quit)) => return Ok(()),
                        Ok(Some(command)) => self.execute(command),
                        Ok(None) => {}
                        Err(problem) => print_lines(&[OutputLine::Err(problem)]),
                    }
                    prompt();
                }
                msg = self.runner.next_msg() => match msg {
                    Some(msg) => self.dispatch(msg),
                    None => return Ok(()),
                },
            }
        }
    }

    /// Executes `script` one command at a time, waiting for every remote
    /// call to settle before the next command.
    async fn run_script(&mut self, script: Vec<Command>) -> bool {
        let mut script = VecDeque::from(script);
        loop {
            while self.is_settled() {
                match script.pop_front() {
                    Some(command) => self.execute(command),
                    None => return self.errors_shown == 0,
                }
            }
            match self.runner.next_msg().await {
                Some(msg) => self.dispatch(msg),
                None => return false,
            }
        }
    }

    fn is_settled(&self) -> bool {
        self.state.transfer().is_idle()
            && !self.state.download().is_busy()
            && !self.state.cleanup().is_busy()
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Add(paths) => {
                for msg in select_paths(&paths, SelectionSource::Picker) {
                    self.dispatch(msg);
                }
            }
            Command::Drop(paths) => {
                for msg in select_paths(&paths, SelectionSource::Drop) {
                    self.dispatch(msg);
                }
            }
            Command::Remove(RemoveTarget::Id(id)) => self.dispatch(Msg::RemoveClicked { id }),
            Command::Remove(RemoveTarget::Name(name)) => self.dispatch(Msg::RemoveNamed { name }),
            Command::List => print_lines(&render_list(&self.state.view())),
            Command::Submit => self.dispatch(Msg::SubmitClicked),
            Command::Download => self.dispatch(Msg::DownloadClicked),
            Command::Cleanup => self.dispatch(Msg::CleanupClicked),
            Command::Status => print_lines(&[render_status(&self.state.view())]),
            Command::Help => print_lines(&[OutputLine::Out(HELP_TEXT.to_string())]),
            Command::Quit => {}
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let was_dirty = state.consume_dirty();
            self.state = state;

            let report = self.runner.run(effects);
            queue.extend(report.messages);
            for path in report.saved {
                print_lines(&[OutputLine::Out(format!("Saved {}", path.display()))]);
            }

            if was_dirty {
                self.render();
            }
        }
    }

    fn render(&mut self) {
        let next = self.state.view();
        if let (Some(old), None) = (&self.last_view.notification, &next.notification) {
            extractor_debug!("Notification {} cleared", old.id);
        }
        if let Some(note) = &next.notification {
            let is_new = self
                .last_view
                .notification
                .as_ref()
                .map_or(true, |old| old.id != note.id);
            if is_new && note.kind == NotificationKind::Error {
                self.errors_shown += 1;
            }
        }
        let stamp = chrono::Local::now().format("%H:%M:%S").to_string();
        print_lines(&render(&self.last_view, &next, &stamp));
        self.last_view = next;
    }
}

fn print_lines(lines: &[OutputLine]) {
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    for line in lines {
        let _ = match line {
            OutputLine::Out(text) => writeln!(stdout, "{text}"),
            OutputLine::Err(text) => writeln!(stderr, "{text}"),
        };
    }
}

fn prompt() {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "> ");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use extractor_engine::{
        ConversionService, EngineEvent, FailureKind, ProgressSink, RequestId, ServiceError,
        UploadFile,
    };
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeService {
        reject_with: Option<String>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FakeService {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ConversionService for FakeService {
        async fn process(
            &self,
            request: RequestId,
            _files: &[UploadFile],
            sink: &dyn ProgressSink,
        ) -> Result<(), ServiceError> {
            sink.emit(EngineEvent::UploadStarted { request });
            tokio::task::yield_now().await;
            self.calls.lock().unwrap().push("process");
            match &self.reject_with {
                Some(text) => Err(ServiceError {
                    kind: FailureKind::Rejected { status: 500 },
                    message: "request failed with status 500".to_string(),
                    server_message: Some(text.clone()),
                }),
                None => Ok(()),
            }
        }

        async fn download(&self) -> Result<Bytes, ServiceError> {
            self.calls.lock().unwrap().push("download");
            Ok(Bytes::from_static(b"PK\x03\x04"))
        }

        async fn cleanup(&self) -> Result<(), ServiceError> {
            self.calls.lock().unwrap().push("cleanup");
            Ok(())
        }
    }

    fn shell_with(service: Arc<FakeService>, output: &Path) -> Shell {
        let runner = EffectRunner::new(
            EngineHandle::with_service(service),
            ArtifactWriter::new(output.to_path_buf()),
        );
        Shell::new(runner)
    }

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn one_shot(files: Vec<PathBuf>) -> Vec<Command> {
        vec![Command::Add(files), Command::Submit, Command::Download]
    }

    #[tokio::test]
    async fn successful_run_downloads_after_submit_settles() {
        let temp = TempDir::new().unwrap();
        let pdf = write_file(temp.path(), "a.pdf", b"%PDF-1.7");
        let service = Arc::new(FakeService::default());
        let mut shell = shell_with(service.clone(), temp.path());

        assert!(shell.run_script(one_shot(vec![pdf])).await);

        assert_eq!(service.calls(), vec!["process", "download"]);
        assert_eq!(
            fs::read(temp.path().join("extracted_data.xlsx")).unwrap(),
            b"PK\x03\x04"
        );
        assert!(shell.state.selection().is_empty());
        assert_eq!(shell.errors_shown, 0);
        assert_eq!(
            shell.last_view.notification.as_ref().map(|n| n.text.as_str()),
            Some("File downloaded successfully!")
        );
    }

    #[tokio::test]
    async fn server_rejection_fails_the_run_and_skips_download() {
        let temp = TempDir::new().unwrap();
        let pdf = write_file(temp.path(), "c.pdf", b"%PDF-1.4");
        let service = Arc::new(FakeService {
            reject_with: Some("bad scan".to_string()),
            ..FakeService::default()
        });
        let mut shell = shell_with(service.clone(), temp.path());

        assert!(!shell.run_script(one_shot(vec![pdf])).await);

        assert_eq!(service.calls(), vec!["process"]);
        assert_eq!(shell.state.selection().len(), 1);
        assert!(!temp.path().join("extracted_data.xlsx").exists());
        assert_eq!(
            shell.last_view.notification.as_ref().map(|n| n.text.as_str()),
            Some("bad scan")
        );
    }

    #[tokio::test]
    async fn fully_rejected_batch_fails_without_a_request() {
        let temp = TempDir::new().unwrap();
        let text = write_file(temp.path(), "notes.pdf", b"just text");
        let service = Arc::new(FakeService::default());
        let mut shell = shell_with(service.clone(), temp.path());

        assert!(!shell.run_script(one_shot(vec![text])).await);

        assert!(service.calls().is_empty());
        assert_eq!(shell.errors_shown, 1);
    }

    #[tokio::test]
    async fn every_rejection_in_a_batch_is_counted() {
        let temp = TempDir::new().unwrap();
        let first = write_file(temp.path(), "one.pdf", b"not a pdf");
        let second = write_file(temp.path(), "two.pdf", b"nor this");
        let missing = temp.path().join("gone.pdf");
        let good = write_file(temp.path(), "good.pdf", b"%PDF-1.5");
        let service = Arc::new(FakeService::default());
        let mut shell = shell_with(service.clone(), temp.path());

        shell.execute(Command::Add(vec![first, second, missing, good]));

        assert_eq!(shell.errors_shown, 3);
        assert_eq!(shell.state.selection().len(), 1);
    }

    #[tokio::test]
    async fn expiry_clears_the_rendered_notification() {
        let temp = TempDir::new().unwrap();
        let text = write_file(temp.path(), "notes.pdf", b"just text");
        let mut shell = shell_with(Arc::new(FakeService::default()), temp.path());

        shell.execute(Command::Add(vec![text]));
        let id = shell.last_view.notification.as_ref().map(|n| n.id).unwrap();

        shell.dispatch(Msg::NotificationExpired { id });
        assert!(shell.last_view.notification.is_none());
        assert_eq!(shell.errors_shown, 1);
    }
}
