//! Journal worker that mirrors battle events to an append-only file.
//!
//! Each line of the journal is one JSON-encoded [`Event`]:
//!
//! ```text
//! {"Log":{"seq":0,"entry":{"kind":"Info","message":"Battle Start!"}}}
//! {"Battle":{"Started":{"order":[1,3,0,2,4]}}}
//! ...
//! {"Battle":{"Ended":{"result":"Victory","experience":80,"forced":false}}}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::api::Result;
use crate::events::{BattleEvent, Event, EventBus, Topic};

/// Background task that appends log and battle events to a file.
///
/// Stops after writing [`BattleEvent::Ended`], when the bus closes, or when
/// the stop signal fires (or its sender is dropped).
pub struct JournalWorker {
    path: PathBuf,
    writer: BufWriter<File>,
    log_rx: broadcast::Receiver<Event>,
    battle_rx: broadcast::Receiver<Event>,
    stop_rx: oneshot::Receiver<()>,
    written: u64,
}

impl JournalWorker {
    /// Creates the journal file (truncating an existing one) and subscribes
    /// to the bus. Subscribe before the battle starts so nothing is missed.
    pub fn new(path: &Path, event_bus: &EventBus, stop_rx: oneshot::Receiver<()>) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            log_rx: event_bus.subscribe(Topic::Log),
            battle_rx: event_bus.subscribe(Topic::Battle),
            stop_rx,
            written: 0,
        })
    }

    /// Main worker loop.
    pub async fn run(mut self) -> Result<()> {
        info!(target: "runtime::journal", "Journaling battle to {}", self.path.display());

        loop {
            tokio::select! {
                biased;

                event = self.log_rx.recv() => match event {
                    Ok(event) => self.append(&event)?,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target: "runtime::journal", "Journal missed {} log events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                },
                event = self.battle_rx.recv() => match event {
                    Ok(event) => {
                        let ended = matches!(event, Event::Battle(BattleEvent::Ended(_)));
                        self.append(&event)?;
                        if ended {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            target: "runtime::journal",
                            "Journal missed {} battle events", skipped
                        );
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = &mut self.stop_rx => break,
            }
        }

        // Log lines already published belong in the journal too.
        while let Ok(event) = self.log_rx.try_recv() {
            self.append(&event)?;
        }
        self.writer.flush()?;

        debug!(
            target: "runtime::journal",
            "Journal closed after {} events", self.written
        );
        Ok(())
    }

    fn append(&mut self, event: &Event) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event).map_err(std::io::Error::from)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}
