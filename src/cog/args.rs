//! cog::args
//!
//! Assemble `cog` command lines from option bundles.
//!
//! Flags are appended in a fixed order per operation. Free text (messages,
//! metadata, author names) is always double-quoted; identifier-like values
//! stay bare unless they contain shell-significant characters.

use std::fmt;

use super::error::CogError;
use super::options::{
    BumpOptions, ChangelogOptions, CheckOptions, CommitOptions, GetVersionOptions,
    InstallHooksOptions, LogOptions, VerifyOptions,
};

/// The public cocogitto operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Bump,
    Changelog,
    Check,
    Commit,
    GetVersion,
    InstallHooks,
    Log,
    Verify,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Bump,
        Operation::Changelog,
        Operation::Check,
        Operation::Commit,
        Operation::GetVersion,
        Operation::InstallHooks,
        Operation::Log,
        Operation::Verify,
    ];

    /// Operation name as exposed by this crate.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Bump => "bump",
            Operation::Changelog => "changelog",
            Operation::Check => "check",
            Operation::Commit => "commit",
            Operation::GetVersion => "get-version",
            Operation::InstallHooks => "install-hooks",
            Operation::Log => "log",
            Operation::Verify => "verify",
        }
    }

    /// The `cog` subcommand implementing the operation.
    pub fn subcommand(self) -> &'static str {
        match self {
            Operation::InstallHooks => "install-hook",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled `cog` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CogCommand {
    pub operation: Operation,
    /// Shell-ready tokens (already quoted where needed)
    pub args: Vec<String>,
}

impl CogCommand {
    fn new(operation: Operation) -> Self {
        Self {
            operation,
            args: Vec::new(),
        }
    }

    fn flag(&mut self, flag: &str) {
        self.args.push(flag.to_string());
    }

    fn flag_if(&mut self, enabled: bool, flag: &str) {
        if enabled {
            self.flag(flag);
        }
    }

    fn word_option(&mut self, flag: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.flag(flag);
            self.args.push(word(value));
        }
    }

    fn quoted_option(&mut self, flag: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.flag(flag);
            self.args.push(quote(value));
        }
    }

    /// `cog <subcommand> <args...>`
    pub fn shell_line(&self) -> String {
        let mut line = format!("cog {}", self.operation.subcommand());
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for CogCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shell_line())
    }
}

/// Treat `Some("")` like `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn is_plain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "._/:@+=,^-".contains(c)
}

/// Double-quote `value` for `sh`, escaping `\`, `"`, `$` and `` ` ``.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Leave identifier-like values bare, quote anything else.
pub fn word(value: &str) -> String {
    if !value.is_empty() && value.chars().all(is_plain_char) {
        value.to_string()
    } else {
        quote(value)
    }
}

pub fn bump(options: &BumpOptions) -> CogCommand {
    let mut cmd = CogCommand::new(Operation::Bump);

    match present(&options.version) {
        Some(version) => cmd.word_option("--version", Some(version)),
        None => {
            cmd.flag_if(options.auto, "--auto");
            cmd.flag_if(options.major, "--major");
            cmd.flag_if(options.minor, "--minor");
            cmd.flag_if(options.patch, "--patch");
        }
    }

    cmd.flag_if(options.dry_run, "--dry-run");
    cmd.quoted_option("--pre", present(&options.pre));
    cmd.quoted_option("--build", present(&options.build));
    cmd.flag_if(options.skip_ci, "--skip-ci");
    cmd
}

pub fn changelog(options: &ChangelogOptions) -> CogCommand {
    let mut cmd = CogCommand::new(Operation::Changelog);

    cmd.word_option("--at", present(&options.at));

    let template = present(&options.template);
    cmd.word_option("--template", template);
    if template == Some("remote") {
        cmd.word_option("--remote", present(&options.remote));
        cmd.word_option("--owner", present(&options.owner));
        cmd.word_option("--repository", present(&options.repository));
    }

    if let Some(pattern) = present(&options.pattern) {
        cmd.args.push(word(pattern));
    }
    cmd
}

pub fn check(_options: &CheckOptions) -> CogCommand {
    CogCommand::new(Operation::Check)
}

/// Fails before anything runs when the type or message is blank.
pub fn commit(options: &CommitOptions) -> Result<CogCommand, CogError> {
    if options.commit_type.trim().is_empty() {
        return Err(CogError::InvalidCommitType);
    }
    if options.message.trim().is_empty() {
        return Err(CogError::EmptyCommitMessage);
    }

    let mut cmd = CogCommand::new(Operation::Commit);
    cmd.args.push(word(&options.commit_type));
    cmd.flag_if(options.breaking_change, "-B");
    cmd.args.push(quote(&options.message));
    if let Some(scope) = present(&options.scope) {
        cmd.args.push(word(scope));
    }
    Ok(cmd)
}

pub fn get_version(options: &GetVersionOptions) -> CogCommand {
    let mut cmd = CogCommand::new(Operation::GetVersion);
    cmd.flag_if(options.silence, "-v");
    cmd.word_option("--package", present(&options.package));
    cmd.word_option("--fallback", present(&options.fallback));
    cmd
}

pub fn install_hooks(options: &InstallHooksOptions) -> CogCommand {
    let mut cmd = CogCommand::new(Operation::InstallHooks);
    match present(&options.hook) {
        Some(hook) => cmd.args.push(word(hook)),
        None => cmd.flag("--all"),
    }
    cmd
}

pub fn log(options: &LogOptions) -> CogCommand {
    let mut cmd = CogCommand::new(Operation::Log);

    if !options.authors.is_empty() {
        cmd.flag("--author");
        cmd.args
            .extend(options.authors.iter().map(|author| quote(author)));
    }
    cmd.flag_if(options.breaking_only, "-B");
    cmd.word_option("--type", present(&options.commit_type));
    cmd.word_option("--scope", present(&options.scope));
    cmd.flag_if(options.no_error, "--no-error");
    cmd
}

pub fn verify(options: &VerifyOptions) -> CogCommand {
    let mut cmd = CogCommand::new(Operation::Verify);
    cmd.args.push(quote(&options.message));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn quoting_escapes_shell_metacharacters() {
        assert_eq!(quote("alice"), "\"alice\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("$HOME `id` \\"), "\"\\$HOME \\`id\\` \\\\\"");
    }

    #[test]
    fn words_stay_bare_when_safe() {
        assert_eq!(word("0.1.0"), "0.1.0");
        assert_eq!(word("1.0.0..2.0.0"), "1.0.0..2.0.0");
        assert_eq!(word("github.com"), "github.com");
        assert_eq!(word("two words"), "\"two words\"");
        assert_eq!(word("a;rm -rf /"), "\"a;rm -rf /\"");
        assert_eq!(word("~/x"), "\"~/x\"");
    }

    #[test]
    fn bump_increment_flags_in_order() {
        let cmd = bump(&BumpOptions {
            auto: true,
            major: true,
            patch: true,
            dry_run: true,
            skip_ci: true,
            ..Default::default()
        });
        assert_eq!(
            cmd.shell_line(),
            "cog bump --auto --major --patch --dry-run --skip-ci"
        );
    }

    #[test]
    fn bump_explicit_version_suppresses_increments() {
        let cmd = bump(&BumpOptions {
            auto: true,
            major: true,
            minor: true,
            patch: true,
            version: some("2.0.0"),
            pre: some("alpha.1"),
            build: some("sha 1234"),
            ..Default::default()
        });
        assert_eq!(
            cmd.shell_line(),
            "cog bump --version 2.0.0 --pre \"alpha.1\" --build \"sha 1234\""
        );
    }

    #[test]
    fn bump_empty_version_counts_as_absent() {
        let cmd = bump(&BumpOptions {
            minor: true,
            version: some(""),
            ..Default::default()
        });
        assert_eq!(cmd.shell_line(), "cog bump --minor");
    }

    #[test]
    fn changelog_remote_fields_need_remote_template() {
        let base = ChangelogOptions {
            at: some("1.2.0"),
            remote: some("github.com"),
            owner: some("acme"),
            repository: some("app"),
            ..Default::default()
        };

        let full_hash = changelog(&ChangelogOptions {
            template: some("full_hash"),
            ..base.clone()
        });
        assert_eq!(
            full_hash.shell_line(),
            "cog changelog --at 1.2.0 --template full_hash"
        );

        let remote = changelog(&ChangelogOptions {
            template: some("remote"),
            ..base.clone()
        });
        assert_eq!(
            remote.shell_line(),
            "cog changelog --at 1.2.0 --template remote --remote github.com --owner acme --repository app"
        );

        let untemplated = changelog(&base);
        assert_eq!(untemplated.shell_line(), "cog changelog --at 1.2.0");
    }

    #[test]
    fn changelog_skips_empty_remote_fields_and_appends_pattern() {
        let cmd = changelog(&ChangelogOptions {
            template: some("remote"),
            remote: some("gitlab.com"),
            owner: some(""),
            pattern: some("1.0.0..2.0.0"),
            ..Default::default()
        });
        assert_eq!(
            cmd.shell_line(),
            "cog changelog --template remote --remote gitlab.com 1.0.0..2.0.0"
        );
    }

    #[test]
    fn check_has_no_flags() {
        assert_eq!(check(&CheckOptions::default()).shell_line(), "cog check");
    }

    #[test]
    fn commit_requires_type_and_message() {
        let missing_type = commit(&CommitOptions {
            message: "add login".into(),
            ..Default::default()
        });
        assert!(matches!(missing_type, Err(CogError::InvalidCommitType)));

        let missing_message = commit(&CommitOptions {
            commit_type: "feat".into(),
            message: "  ".into(),
            ..Default::default()
        });
        assert!(matches!(missing_message, Err(CogError::EmptyCommitMessage)));
    }

    #[test]
    fn commit_assembles_breaking_change_and_scope() {
        let cmd = commit(&CommitOptions {
            commit_type: "feat".into(),
            message: "drop legacy API".into(),
            scope: some("api"),
            breaking_change: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cmd.shell_line(), "cog commit feat -B \"drop legacy API\" api");
    }

    #[test]
    fn get_version_flag_order() {
        let cmd = get_version(&GetVersionOptions {
            package: some("core"),
            fallback: some("0.1.0"),
            silence: true,
            ..Default::default()
        });
        assert_eq!(
            cmd.shell_line(),
            "cog get-version -v --package core --fallback 0.1.0"
        );
    }

    #[test]
    fn install_hooks_defaults_to_all() {
        assert_eq!(
            install_hooks(&InstallHooksOptions::default()).shell_line(),
            "cog install-hook --all"
        );
        assert_eq!(
            install_hooks(&InstallHooksOptions {
                hook: some("commit-msg"),
                ..Default::default()
            })
            .shell_line(),
            "cog install-hook commit-msg"
        );
    }

    #[test]
    fn log_quotes_each_author_in_order() {
        let cmd = log(&LogOptions {
            authors: vec!["alice".into(), "bob".into()],
            commit_type: some("feat"),
            scope: some("cli"),
            no_error: true,
            breaking_only: true,
            ..Default::default()
        });
        assert_eq!(
            cmd.shell_line(),
            "cog log --author \"alice\" \"bob\" -B --type feat --scope cli --no-error"
        );
    }

    #[test]
    fn log_without_authors() {
        assert_eq!(log(&LogOptions::default()).shell_line(), "cog log");
    }

    #[test]
    fn verify_quotes_message() {
        let cmd = verify(&VerifyOptions {
            message: "feat(cli): add `--json`".into(),
            ..Default::default()
        });
        assert_eq!(
            cmd.shell_line(),
            "cog verify \"feat(cli): add \\`--json\\`\""
        );
    }

    #[test]
    fn operation_names() {
        let names: Vec<&str> = Operation::ALL.iter().map(|op| op.as_str()).collect();
        assert_eq!(
            names,
            [
                "bump",
                "changelog",
                "check",
                "commit",
                "get-version",
                "install-hooks",
                "log",
                "verify"
            ]
        );
        assert_eq!(Operation::InstallHooks.subcommand(), "install-hook");
    }
}
