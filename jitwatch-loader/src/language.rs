use std::fmt;

/// JVM languages whose sources can be located.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    Java,
    Scala,
    Kotlin,
    Groovy,
    JavaScript,
    Clojure,
    JRuby,
}

impl Language {
    /// Every known language, in lookup priority order.
    pub const ALL: [Language; 7] = [
        Language::Java,
        Language::Scala,
        Language::Kotlin,
        Language::Groovy,
        Language::JavaScript,
        Language::Clojure,
        Language::JRuby,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Scala => "Scala",
            Language::Kotlin => "Kotlin",
            Language::Groovy => "Groovy",
            Language::JavaScript => "JavaScript",
            Language::Clojure => "Clojure",
            Language::JRuby => "JRuby",
        }
    }

    /// Source file extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Scala => "scala",
            Language::Kotlin => "kt",
            Language::Groovy => "groovy",
            Language::JavaScript => "js",
            Language::Clojure => "clj",
            Language::JRuby => "rb",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        Self::ALL.into_iter().find(|l| l.extension() == ext)
    }

    /// Extensions of all known languages, in priority order.
    pub fn known_extensions() -> Vec<String> {
        Self::ALL.iter().map(|l| l.extension().to_owned()).collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
