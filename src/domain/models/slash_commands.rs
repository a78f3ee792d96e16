#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
    remainder: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }

        let prefix = args.remove(0);
        let trimmed = text.trim_start();
        let after = &trimmed[prefix.len()..];
        let remainder = after
            .strip_prefix(|c: char| return c.is_whitespace())
            .unwrap_or(after)
            .to_string();
        let cmd = SlashCommand {
            command: prefix,
            args,
            remainder,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_language()
            || cmd.is_languages()
            || cmd.is_runtimes()
            || cmd.is_load()
            || cmd.is_open()
            || cmd.is_files()
            || cmd.is_stdin()
            || cmd.is_args()
            || cmd.is_run()
            || cmd.is_history()
            || cmd.is_clear()
            || cmd.is_new_conversation()
            || cmd.is_cancel()
            || cmd.is_theme()
            || cmd.is_font()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Everything after the command, with the original spacing collapsed.
    pub fn rest(&self) -> String {
        return self.args.join(" ");
    }

    /// Everything after the command and its separator, spacing untouched.
    pub fn raw_rest(&self) -> &str {
        return &self.remainder;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_language(&self) -> bool {
        return ["/l", "/lang", "/language"].contains(&self.command.as_str());
    }

    pub fn is_languages(&self) -> bool {
        return ["/ll", "/languages"].contains(&self.command.as_str());
    }

    pub fn is_runtimes(&self) -> bool {
        return ["/runtimes"].contains(&self.command.as_str());
    }

    pub fn is_load(&self) -> bool {
        return ["/load"].contains(&self.command.as_str());
    }

    pub fn is_open(&self) -> bool {
        return ["/o", "/open"].contains(&self.command.as_str());
    }

    pub fn is_files(&self) -> bool {
        return ["/f", "/files"].contains(&self.command.as_str());
    }

    pub fn is_stdin(&self) -> bool {
        return ["/stdin"].contains(&self.command.as_str());
    }

    pub fn is_args(&self) -> bool {
        return ["/args"].contains(&self.command.as_str());
    }

    pub fn is_run(&self) -> bool {
        return ["/r", "/run"].contains(&self.command.as_str());
    }

    pub fn is_history(&self) -> bool {
        return ["/hi", "/history"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/c", "/clear"].contains(&self.command.as_str());
    }

    pub fn is_new_conversation(&self) -> bool {
        return ["/n", "/new"].contains(&self.command.as_str());
    }

    pub fn is_cancel(&self) -> bool {
        return ["/x", "/cancel"].contains(&self.command.as_str());
    }

    pub fn is_theme(&self) -> bool {
        return ["/theme"].contains(&self.command.as_str());
    }

    pub fn is_font(&self) -> bool {
        return ["/font"].contains(&self.command.as_str());
    }
}
