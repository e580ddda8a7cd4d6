use std::path::PathBuf;

xflags::xflags! {
    /// Generates static lesson pages for a course.
    cmd chalkboard {
        /// Log more; repeat for more detail.
        repeated -v, --verbose
        /// The course directory. Defaults to the current directory.
        optional -d, --dir dir: PathBuf
        /// Read the course configuration from this file instead of
        /// `course.toml` in the course directory.
        optional -c, --config config: PathBuf

        /// Write the assets, every configured track, and the index.
        default cmd build {}

        /// Generate one lesson.
        cmd lesson {
            required number: u32
            /// The lesson topic. Without it, the single-lesson table is used.
            optional --topic topic: String
            /// The lesson category. Defaults to `advanced`.
            optional --category category: String
        }

        /// Write the stylesheet and script.
        cmd assets {}

        /// List the lessons recorded in the course metadata.
        cmd list {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> xflags::Result<Chalkboard> {
        Chalkboard::from_vec(args.iter().map(|arg| std::ffi::OsString::from(*arg)).collect())
    }

    #[test]
    fn build_is_the_default() {
        let flags = parse(&[]).unwrap();
        assert!(matches!(flags.subcommand, ChalkboardCmd::Build(_)));
        assert_eq!(flags.verbose, 0);
        assert!(flags.dir.is_none());
    }

    #[test]
    fn lesson_arguments() {
        let flags = parse(&["-v", "-v", "-d", "course", "lesson", "35", "--topic", "Cursor 마스터되기"]).unwrap();
        assert_eq!(flags.verbose, 2);
        assert_eq!(flags.dir, Some(PathBuf::from("course")));

        let ChalkboardCmd::Lesson(lesson) = flags.subcommand else {
            panic!("expected the lesson command");
        };

        assert_eq!(lesson.number, 35);
        assert_eq!(lesson.topic.as_deref(), Some("Cursor 마스터되기"));
        assert!(lesson.category.is_none());
    }

    #[test]
    fn lesson_needs_a_number() {
        assert!(parse(&["lesson"]).is_err());
        assert!(parse(&["lesson", "three"]).is_err());
    }
}
