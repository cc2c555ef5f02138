//! Command handlers.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use chrono::Utc;
use clausewise_core::{ContractList, FilterState, SessionState, UploadFile, UploadPanel};
use clausewise_store::{
    HttpSource, JsonFileSource, RecordSource, SessionFile, SimulatedUploadSink, UploadSink,
    load_store,
};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::display;

/// Everything a command needs: the record source, the session and where
/// the session is saved.
pub struct App {
    source: Box<dyn RecordSource>,
    session_file: SessionFile,
    session: SessionState,
    colour: bool,
}

impl App {
    /// Build the app from configuration and restore any saved session.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let source: Box<dyn RecordSource> = match &cli.url {
            Some(url) => Box::new(HttpSource::new(url.clone()).with_latency(cli.latency())),
            None => Box::new(JsonFileSource::new(&cli.data).with_latency(cli.latency())),
        };
        let session_file = SessionFile::new(&cli.session_file);
        let saved = session_file
            .load()
            .with_context(|| format!("reading {}", session_file.path().display()))?;
        let session = SessionState::restore(saved, Utc::now());
        Ok(Self {
            source,
            session_file,
            session,
            colour: !cli.no_color,
        })
    }

    pub async fn run(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Login { username, password } => self.login(&username, &password),
            Command::Logout => self.logout(),
            Command::Whoami => self.whoami(),
            Command::List {
                search,
                statuses,
                risks,
                page,
                all,
            } => {
                let filters = build_filters(search, &statuses, &risks);
                self.list(filters, page, all).await
            }
            Command::Show { id, evidence } => self.show(&id, evidence).await,
            Command::Facets => self.facets().await,
            Command::Upload {
                files,
                delay_ms,
                success_rate,
            } => {
                let sink = SimulatedUploadSink::new(Duration::from_millis(delay_ms), success_rate);
                self.upload(&files, &sink).await
            }
        }
    }

    // ── Session ──

    fn login(&mut self, username: &str, password: &str) -> anyhow::Result<()> {
        let session = self.session.login(username, password, Utc::now())?.clone();
        self.session_file
            .save(&session)
            .context("saving session")?;
        println!("Logged in as {} <{}>", session.user.name, session.user.email);
        Ok(())
    }

    fn logout(&mut self) -> anyhow::Result<()> {
        let previous = self.session.logout();
        self.session_file.clear().context("clearing session")?;
        match previous {
            Some(s) => println!("Logged out {}", s.user.username),
            None => println!("Not logged in"),
        }
        Ok(())
    }

    fn whoami(&self) -> anyhow::Result<()> {
        let user = self.session.require()?;
        println!("{} <{}> ({})", user.name, user.email, user.username);
        Ok(())
    }

    // ── Contracts ──

    async fn load_list(&self) -> anyhow::Result<ContractList> {
        let store = load_store(self.source.as_ref())
            .await
            .context("Failed to load contracts data")?;
        Ok(ContractList::new(store))
    }

    async fn list(&self, filters: FilterState, page: usize, all: bool) -> anyhow::Result<()> {
        self.session.require()?;
        let mut list = self.load_list().await?;
        list.set_filters(filters);

        if !all {
            list.go_to_page(page);
            display::print_page(&list, &list.page(), self.colour);
            return Ok(());
        }

        loop {
            let view = list.page();
            let last = !view.has_next;
            display::print_page(&list, &view, self.colour);
            if last {
                break;
            }
            list.next_page();
        }
        Ok(())
    }

    async fn show(&self, id: &str, evidence: Option<usize>) -> anyhow::Result<()> {
        self.session.require()?;
        let record = self
            .source
            .find_by_id(id)
            .await
            .context("Failed to load contract details")?;

        match evidence {
            None => display::print_contract_card(&record, self.colour),
            Some(n) => {
                let Some(item) = n.checked_sub(1).and_then(|i| record.evidence.get(i)) else {
                    bail!(
                        "{} has {} evidence item(s); no item {n}",
                        record.id,
                        record.evidence.len()
                    );
                };
                display::print_evidence_detail(n, item);
            }
        }
        Ok(())
    }

    async fn facets(&self) -> anyhow::Result<()> {
        self.session.require()?;
        let list = self.load_list().await?;
        display::print_facets(&list, self.colour);
        Ok(())
    }

    // ── Upload ──

    async fn upload(&self, paths: &[PathBuf], sink: &dyn UploadSink) -> anyhow::Result<()> {
        self.session.require()?;
        let mut panel = UploadPanel::default();
        panel.open();

        let mut pending = Vec::with_capacity(paths.len());
        for path in paths {
            let meta = tokio::fs::metadata(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let file = UploadFile::new(name, meta.len());
            let id = panel.queue_mut().push(file.clone());
            panel.queue_mut().start(id);
            pending.push((id, file));
        }

        info!(files = pending.len(), "starting uploads");
        let outcomes = futures::future::join_all(
            pending.iter().map(|(_, file)| sink.upload(file)),
        )
        .await;
        for ((id, _), outcome) in pending.iter().zip(outcomes) {
            panel.queue_mut().finish(*id, outcome);
        }

        display::print_upload_queue(panel.queue());
        let failed = panel.queue().failed();
        panel.close();
        if failed > 0 {
            bail!("{failed} upload(s) failed");
        }
        Ok(())
    }
}

/// Translate CLI arguments into a filter state. Repeated facet values
/// select once; unrecognised ones are kept and match nothing.
pub fn build_filters(search: Option<String>, statuses: &[String], risks: &[String]) -> FilterState {
    let mut filters = FilterState::new();
    filters.search_query = search.unwrap_or_default();
    for raw in statuses {
        filters.status.select_raw(raw);
    }
    for raw in risks {
        filters.risk.select_raw(raw);
    }
    filters
}
