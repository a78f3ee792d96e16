#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

#[derive(Debug, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Canonical id used everywhere inside codedeck.
    pub name: &'static str,
    /// Language id understood by the execution service.
    pub runtime: &'static str,
    /// Runtime version understood by the execution service.
    pub version: &'static str,
    pub display_name: &'static str,
    pub extension: &'static str,
    /// Syntax highlighting id for editors.
    pub syntax: &'static str,
    pub aliases: &'static [&'static str],
}

impl LanguageConfig {
    pub fn file_name(&self) -> String {
        return format!("main.{}", self.extension);
    }

    fn matches(&self, identifier: &str) -> bool {
        return self.name == identifier || self.aliases.contains(&identifier);
    }
}

static LANGUAGES: &[LanguageConfig] = &[
    LanguageConfig {
        name: "bash",
        runtime: "bash",
        version: "5.2.0",
        display_name: "Bash",
        extension: "sh",
        syntax: "shell",
        aliases: &["sh", "shell"],
    },
    LanguageConfig {
        name: "c",
        runtime: "c",
        version: "10.2.0",
        display_name: "C",
        extension: "c",
        syntax: "c",
        aliases: &["gcc"],
    },
    LanguageConfig {
        name: "cpp",
        runtime: "c++",
        version: "10.2.0",
        display_name: "C++",
        extension: "cpp",
        syntax: "cpp",
        aliases: &["c++", "g++", "cc", "cxx"],
    },
    LanguageConfig {
        name: "csharp",
        runtime: "csharp",
        version: "6.12.0",
        display_name: "C#",
        extension: "cs",
        syntax: "csharp",
        aliases: &["c#", "cs"],
    },
    LanguageConfig {
        name: "go",
        runtime: "go",
        version: "1.16.2",
        display_name: "Go",
        extension: "go",
        syntax: "go",
        aliases: &["golang"],
    },
    LanguageConfig {
        name: "java",
        runtime: "java",
        version: "15.0.2",
        display_name: "Java",
        extension: "java",
        syntax: "java",
        aliases: &[],
    },
    LanguageConfig {
        name: "javascript",
        runtime: "javascript",
        version: "18.15.0",
        display_name: "JavaScript",
        extension: "js",
        syntax: "javascript",
        aliases: &["js", "node", "nodejs"],
    },
    LanguageConfig {
        name: "kotlin",
        runtime: "kotlin",
        version: "1.8.20",
        display_name: "Kotlin",
        extension: "kt",
        syntax: "kotlin",
        aliases: &["kt"],
    },
    LanguageConfig {
        name: "php",
        runtime: "php",
        version: "8.2.3",
        display_name: "PHP",
        extension: "php",
        syntax: "php",
        aliases: &[],
    },
    LanguageConfig {
        name: "python",
        runtime: "python",
        version: "3.10.0",
        display_name: "Python",
        extension: "py",
        syntax: "python",
        aliases: &["py", "python3"],
    },
    LanguageConfig {
        name: "ruby",
        runtime: "ruby",
        version: "3.0.1",
        display_name: "Ruby",
        extension: "rb",
        syntax: "ruby",
        aliases: &["rb"],
    },
    LanguageConfig {
        name: "rust",
        runtime: "rust",
        version: "1.68.2",
        display_name: "Rust",
        extension: "rs",
        syntax: "rust",
        aliases: &["rs"],
    },
    LanguageConfig {
        name: "swift",
        runtime: "swift",
        version: "5.3.3",
        display_name: "Swift",
        extension: "swift",
        syntax: "swift",
        aliases: &[],
    },
    LanguageConfig {
        name: "typescript",
        runtime: "typescript",
        version: "5.0.3",
        display_name: "TypeScript",
        extension: "ts",
        syntax: "typescript",
        aliases: &["ts"],
    },
];

pub struct Languages {}

impl Languages {
    pub fn list() -> &'static [LanguageConfig] {
        return LANGUAGES;
    }

    /// Finds a language by canonical name or alias. Unknown identifiers are
    /// never mapped to a default.
    pub fn resolve(identifier: &str) -> Option<&'static LanguageConfig> {
        let identifier = identifier.trim().to_lowercase();
        if identifier.is_empty() {
            return None;
        }

        return LANGUAGES.iter().find(|lang| return lang.matches(&identifier));
    }

    pub fn from_extension(extension: &str) -> Option<&'static LanguageConfig> {
        let extension = extension.trim().trim_start_matches('.').to_lowercase();

        return LANGUAGES
            .iter()
            .find(|lang| return lang.extension == extension);
    }
}
