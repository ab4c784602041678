//! Shell completion generation for cmdtree
//!
//! This module provides functionality to generate shell completion scripts
//! for bash, zsh and fish. On top of clap's static completion, the words after
//! `cmdtree exec` are completed dynamically by asking `cmdtree complete` for the
//! command tree's suggestions.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{ConfigError, Result};

const BIN_NAME: &str = "cmdtree";

/// Print the completion script for `shell_name` to stdout
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
///
/// # Returns
/// * `Result<()>` - Success or error
pub fn generate_completion(shell_name: &str) -> Result<()> {
    print!("{}", completion_script(shell_name)?);
    Ok(())
}

/// Build the completion script for `shell_name`
pub fn completion_script(shell_name: &str) -> Result<String> {
    let shell = parse_shell(shell_name)?;
    let base = base_completion(shell);

    let extension = match shell {
        Shell::Bash => BASH_EXTENSION,
        Shell::Zsh => ZSH_EXTENSION,
        _ => FISH_EXTENSION,
    };
    Ok(format!("{base}\n{extension}"))
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(ConfigError::InvalidValue {
            field: "shell".to_string(),
            value: shell_name.to_string(),
        }
        .into()),
    }
}

fn base_completion(shell: Shell) -> String {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

const BASH_EXTENSION: &str = r#"
# Complete command lines after `cmdtree exec` from the command tree
_cmdtree_exec_line() {
    local line="${COMP_LINE#*exec }"
    cmdtree complete -- "$line" 2>/dev/null
}

_cmdtree_enhanced() {
    local cur prev words cword
    _init_completion || return

    local i
    for (( i = 1; i < cword; i++ )); do
        if [[ "${words[i]}" == "exec" ]]; then
            local IFS=$'\n'
            COMPREPLY=($(_cmdtree_exec_line))
            return 0
        fi
    done

    # Fall back to default completion
    _cmdtree "$@"
}

complete -F _cmdtree_enhanced cmdtree
"#;

const ZSH_EXTENSION: &str = r#"
# Complete command lines after `cmdtree exec` from the command tree
_cmdtree_exec_line() {
    local -a suggestions
    local line="${BUFFER#*exec }"
    suggestions=("${(@f)$(cmdtree complete -- "$line" 2>/dev/null)}")
    compadd -a suggestions
}

_cmdtree_enhanced() {
    if (( ${words[(I)exec]} )); then
        _cmdtree_exec_line
        return 0
    fi
    _cmdtree "$@"
}

compdef _cmdtree_enhanced cmdtree
"#;

const FISH_EXTENSION: &str = r#"
# Complete command lines after `cmdtree exec` from the command tree
function __cmdtree_exec_line
    set -l line (string replace -r '^.*?exec ' '' -- (commandline -cp))
    cmdtree complete -- "$line" 2>/dev/null
end

complete -c cmdtree -n "__fish_seen_subcommand_from exec" -f -a "(__cmdtree_exec_line)"
"#;
