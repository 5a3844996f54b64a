use crossterm::event::{self, Event, KeyCode};
use egfr_cohort::distribution::PlotPanel;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Spacing},
    style::{Color, Style},
    text::Text,
};

use super::widgets::{BoxPlotChart, PanelSummary};

#[derive(Debug)]
pub(crate) struct PlotApp {
    panels: Vec<PlotPanel>,
    selected_panel: usize,
    should_exit: bool,
}

impl PlotApp {
    pub(crate) fn new(panels: Vec<PlotPanel>) -> Self {
        Self {
            panels,
            selected_panel: 0,
            should_exit: false,
        }
    }

    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.should_exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_event(&event::read()?);
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [chart_area, summary_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(44)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);

        if let Some(panel) = self.panels.get(self.selected_panel) {
            let title = format!(
                "[{}/{}] {}",
                self.selected_panel + 1,
                self.panels.len(),
                panel.title
            );
            frame.render_widget(
                BoxPlotChart {
                    title: &title,
                    panel,
                },
                chart_area,
            );
            frame.render_widget(PanelSummary { panel }, summary_area);
        }

        let help_text = Text::from("←/→: Panel | q/Esc: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help_text, help_area);
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
                KeyCode::Left | KeyCode::Up if !self.panels.is_empty() => {
                    self.selected_panel = self
                        .selected_panel
                        .checked_sub(1)
                        .unwrap_or(self.panels.len() - 1);
                }
                KeyCode::Right | KeyCode::Down if !self.panels.is_empty() => {
                    self.selected_panel = (self.selected_panel + 1) % self.panels.len();
                }
                _ => {}
            }
        }
    }
}
