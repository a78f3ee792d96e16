#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use owo_colors::OwoColorize;

use crate::domain::models::AnalysisResult;
use crate::domain::models::ExecutionResult;
use crate::domain::models::History;
use crate::domain::models::Languages;
use crate::domain::models::Preferences;
use crate::domain::models::Reference;
use crate::domain::services::actions::help_text;
use crate::domain::services::AppState;
use crate::domain::services::Notice;

/// Formats panel state for the terminal. Colors are skipped when the output
/// is not a terminal.
pub struct Render {
    colors: bool,
}

impl Render {
    pub fn new(colors: bool) -> Render {
        return Render { colors };
    }

    fn red(&self, text: &str) -> String {
        if !self.colors {
            return text.to_string();
        }
        return text.red().to_string();
    }

    fn green(&self, text: &str) -> String {
        if !self.colors {
            return text.to_string();
        }
        return text.green().to_string();
    }

    fn yellow(&self, text: &str) -> String {
        if !self.colors {
            return text.to_string();
        }
        return text.yellow().to_string();
    }

    fn dimmed(&self, text: &str) -> String {
        if !self.colors {
            return text.to_string();
        }
        return text.dimmed().to_string();
    }

    fn heading(&self, text: &str) -> String {
        if !self.colors {
            return text.to_string();
        }
        return text.bold().underline().to_string();
    }

    fn exit_status(&self, result: &ExecutionResult) -> String {
        let label = result.status_label();
        if result.succeeded() {
            return self.green(&label);
        }

        return self.red(&label);
    }

    pub fn execution_result(&self, result: &ExecutionResult) -> String {
        let mut sections = vec![format!(
            "{} {} | exit {} | {}ms",
            result.language,
            result.version,
            self.exit_status(result),
            result.execution_time.as_millis()
        )];

        if let Some(compile_output) = &result.compile_output {
            sections.push(format!(
                "{}\n{}",
                self.heading("Compile output"),
                compile_output.trim_end()
            ));
        }
        if !result.stdout.is_empty() {
            sections.push(format!(
                "{}\n{}",
                self.heading("stdout"),
                result.stdout.trim_end()
            ));
        }
        if !result.stderr.is_empty() {
            sections.push(format!(
                "{}\n{}",
                self.heading("stderr"),
                self.yellow(result.stderr.trim_end())
            ));
        }
        if result.stdout.is_empty() && result.stderr.is_empty() && result.compile_output.is_none() {
            sections.push(self.dimmed("(no output)"));
        }

        return sections.join("\n\n");
    }

    pub fn error(&self, message: &str) -> String {
        return format!(
            "{} {}\n{}",
            self.red("Error:"),
            message,
            self.dimmed("Run /clear to dismiss.")
        );
    }

    pub fn history(&self, history: &History) -> String {
        if history.is_empty() {
            return "No runs yet. Use /run to execute the loaded source.".to_string();
        }

        return history
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                return format!(
                    "- ({}) {} {} | exit {} | {}ms",
                    idx + 1,
                    entry.timestamp.format("%H:%M:%S"),
                    entry.language,
                    self.exit_status(&entry.result),
                    entry.result.execution_time.as_millis()
                );
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    pub fn languages(&self) -> String {
        return Languages::list()
            .iter()
            .map(|lang| {
                let mut line = format!("- {} ({} {})", lang.name, lang.display_name, lang.version);
                if !lang.aliases.is_empty() {
                    line = format!(
                        "{line} {}",
                        self.dimmed(&format!("aliases: {}", lang.aliases.join(", ")))
                    );
                }
                return line;
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    pub fn files(&self, preferences: &Preferences) -> String {
        if preferences.files.is_empty() {
            return "No saved files. Use /load to add one.".to_string();
        }

        return preferences
            .files
            .iter()
            .map(|file| {
                let label = if file.path.is_empty() {
                    &file.name
                } else {
                    &file.path
                };
                let mut line = format!("- (ID: {}) {} [{}]", file.id, label, file.language);
                if preferences.active_file_id.as_ref() == Some(&file.id) {
                    line = format!("{line} {}", self.green("active"));
                }
                return line;
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    pub fn references(&self, references: &[Reference]) -> String {
        return references
            .iter()
            .enumerate()
            .map(|(idx, reference)| {
                let mut line = format!("[{}] {} {}", idx + 1, reference.title, self.dimmed(&reference.url));
                if let Some(kind) = &reference.kind {
                    line = format!("{line} ({kind})");
                }
                return line;
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    fn list(&self, title: &str, items: &[String]) -> Option<String> {
        if items.is_empty() {
            return None;
        }

        let lines = items
            .iter()
            .map(|item| return format!("- {item}"))
            .collect::<Vec<String>>()
            .join("\n");

        return Some(format!("{}\n{lines}", self.heading(title)));
    }

    pub fn analysis(&self, result: &AnalysisResult) -> String {
        let mut sections = vec![format!(
            "ATS score: {:.0} | Readiness: {:.0} | Match: {:.0}%",
            result.ats_score, result.readiness_score, result.match_percentage
        )];

        let lists = [
            ("Strengths", &result.strengths),
            ("Gaps", &result.gaps),
            ("Tips", &result.tips),
            ("Recommendations", &result.recommendations),
        ];
        for (title, items) in lists {
            if let Some(section) = self.list(title, items) {
                sections.push(section);
            }
        }

        return sections.join("\n\n");
    }

    pub fn notice(&self, notice: &Notice, app_state: &AppState) -> String {
        return match notice {
            Notice::Info(text) => text.to_string(),
            Notice::Error(text) => self.red(text),
            Notice::Help => help_text(),
            Notice::Languages => self.languages(),
            Notice::History => self.history(&app_state.execution.history),
            Notice::Files => self.files(&app_state.preferences),
        };
    }
}
