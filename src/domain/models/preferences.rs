#[cfg(test)]
#[path = "preferences_test.rs"]
mod tests;

use std::ops::RangeInclusive;
use std::path::Path;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

pub const DEFAULT_THEME: &str = "vs-dark";
pub const DEFAULT_FONT_SIZE: u16 = 14;
pub const THEMES: [&str; 4] = ["vs", "vs-dark", "hc-black", "hc-light"];
pub const FONT_SIZES: RangeInclusive<u16> = 8..=40;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorFile {
    pub id: String,
    pub name: String,
    /// Path the file was loaded from. Two files may share a name but never a
    /// path.
    #[serde(default)]
    pub path: String,
    pub language: String,
    pub content: String,
}

impl EditorFile {
    pub fn new(path: &str, language: &str, content: &str) -> EditorFile {
        let name = Path::new(path)
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return path.to_string());

        return EditorFile {
            id: EditorFile::create_id(),
            name,
            path: path.to_string(),
            language: language.to_string(),
            content: content.to_string(),
        };
    }

    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .take(2)
            .collect::<Vec<&str>>()
            .join("-");
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub files: Vec<EditorFile>,
    #[serde(default)]
    pub active_file_id: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_font_size")]
    pub font_size: u16,
}

fn default_theme() -> String {
    return DEFAULT_THEME.to_string();
}

fn default_font_size() -> u16 {
    return DEFAULT_FONT_SIZE;
}

impl Default for Preferences {
    fn default() -> Preferences {
        return Preferences {
            files: vec![],
            active_file_id: None,
            theme: default_theme(),
            font_size: default_font_size(),
        };
    }
}

impl Preferences {
    pub fn active_file(&self) -> Option<&EditorFile> {
        let id = self.active_file_id.as_ref()?;
        return self.files.iter().find(|file| return &file.id == id);
    }

    pub fn find_file(&self, id_or_name: &str) -> Option<&EditorFile> {
        return self
            .files
            .iter()
            .find(|file| {
                return file.id == id_or_name || file.path == id_or_name || file.name == id_or_name;
            });
    }

    /// Inserts or replaces a file by path and makes it the active file.
    pub fn upsert_file(&mut self, path: &str, language: &str, content: &str) -> String {
        if let Some(existing) = self.files.iter_mut().find(|file| return file.path == path) {
            existing.language = language.to_string();
            existing.content = content.to_string();
            self.active_file_id = Some(existing.id.to_string());
            return existing.id.to_string();
        }

        let file = EditorFile::new(path, language, content);
        let id = file.id.to_string();
        self.files.push(file);
        self.active_file_id = Some(id.to_string());

        return id;
    }

    pub fn set_active(&mut self, id: &str) -> bool {
        if self.files.iter().any(|file| return file.id == id) {
            self.active_file_id = Some(id.to_string());
            return true;
        }

        return false;
    }
}
