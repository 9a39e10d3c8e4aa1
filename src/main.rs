//! gxtmaker CLI - compiles GXT source text to a binary GXT table.

use anyhow::Context;
use clap::Parser;
use gxtmaker::{compile, hexdump, Error, ExitStatus, Options};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const APP_NAME: &str = "gxtmaker";
const APP_MOTTO: &str = "GTA Text Compiler";
const COPYRIGHT_NOTICE: &str = "Copyright (c) 2017 Wes Hampson <thehambone93@gmail.com>";
const LICENSE_NOTICE: &str = "This software is licensed under the MIT License.";
const WARRANTY_NOTICE: &str = "THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.";

#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_MOTTO, disable_version_flag = true)]
struct Cli {
    /// GXT source file to compile
    file: Option<PathBuf>,

    /// Where to write the compiled table
    #[arg(short, long, default_value = gxtmaker::config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Print a hex dump of the compiled table
    #[arg(long)]
    dump: bool,

    /// Do not commit the last key/value pair at end of input
    #[arg(long)]
    no_flush_eof: bool,

    /// Warn about `]` and `}` that close nothing
    #[arg(long)]
    warn_unmatched: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Display program version information and exit
    #[arg(short = 'V', long)]
    version: bool,
}

fn version_banner() -> String {
    format!(
        "{APP_NAME} - {APP_MOTTO}\nVersion {}\n\n{COPYRIGHT_NOTICE}\n\n{LICENSE_NOTICE}\n\n{WARRANTY_NOTICE}",
        env!("CARGO_PKG_VERSION")
    )
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Write the single diagnostic line for `err`.
fn report<E: Write>(err: &anyhow::Error, src: &Path, stderr: &mut E) -> ExitStatus {
    match err.downcast_ref::<Error>() {
        Some(e) => {
            let _ = match e.position() {
                Some((row, column)) => {
                    writeln!(stderr, "{}:{}:{}: error: {}", src.display(), row, column, e)
                }
                None => writeln!(stderr, "{APP_NAME}: error: {e}"),
            };
            e.exit_status()
        }
        None => {
            let _ = writeln!(stderr, "{APP_NAME}: error: {err:#}");
            ExitStatus::IoError
        }
    }
}

fn run<W: Write>(src: &Path, cli: &Cli, stdout: &mut W) -> anyhow::Result<()> {
    let options = Options::new()
        .output_path(&cli.output)
        .flush_pending_on_eof(!cli.no_flush_eof)
        .warn_unmatched_delimiters(cli.warn_unmatched);

    compile(src, &options)?;

    if cli.dump {
        let data = std::fs::read(&options.output_path)
            .with_context(|| format!("unable to read back '{}'", options.output_path.display()))?;
        hexdump::hex_dump(&data, stdout)?;
        stdout.flush()?;
    }

    Ok(())
}

/// Carry out a parsed command line, writing output and diagnostics to the given streams.
fn dispatch<W: Write, E: Write>(cli: &Cli, stdout: &mut W, stderr: &mut E) -> ExitStatus {
    if cli.version {
        let _ = writeln!(stdout, "{}", version_banner());
        return ExitStatus::Success;
    }

    let Some(src) = cli.file.as_deref() else {
        let _ = writeln!(stderr, "{APP_NAME}: error: no input file");
        return ExitStatus::ArgumentError;
    };

    match run(src, cli, stdout) {
        Ok(()) => ExitStatus::Success,
        Err(err) => report(&err, src, stderr),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let status = if e.use_stderr() { ExitStatus::ArgumentError } else { ExitStatus::Success };
            let _ = e.print();
            return status.into();
        }
    };

    if !cli.version && cli.file.is_some() {
        init_logging(cli.verbose);
    }

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    dispatch(&cli, &mut stdout.lock(), &mut stderr.lock()).into()
}
