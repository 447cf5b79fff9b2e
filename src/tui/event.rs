// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

pub struct EventHandler {
    #[allow(dead_code)]
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawns the input task: terminal events are polled between ticks
    /// and forwarded over the channel, and a `Tick` is sent every
    /// `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let sender_clone = sender.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                if let Some(event) = read_terminal_event() {
                    if sender_clone.send(event).is_err() {
                        break;
                    }
                }

                interval.tick().await;
                if sender_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { sender, receiver }
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Event channel closed"))
    }
}

fn read_terminal_event() -> Option<Event> {
    if !event::poll(INPUT_POLL).unwrap_or(false) {
        return None;
    }

    match event::read() {
        Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
        Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
        Ok(CrosstermEvent::Resize(width, height)) => Some(Event::Resize(width, height)),
        _ => None,
    }
}
