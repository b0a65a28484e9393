/*!
# Formula Terminal Module

An interactive line-at-a-time front end. Each line is compiled,
validated, and evaluated; compile errors underline the offending
characters in an echo of the input. Dot-commands inspect the program
and symbol tables.

*/

extern crate ansi_term;
extern crate linefeed;
use crate::mach::Formula;
use ansi_term::Style;
use linefeed::{Interface, ReadResult};
use std::ops::Range;

pub fn main() {
    if let Err(error) = main_loop() {
        eprintln!("{}", error);
    }
}

fn main_loop() -> std::io::Result<()> {
    let mut formula = Formula::<f64>::default();
    formula
        .add_constant("pi", std::f64::consts::PI)
        .expect("default constant table");
    formula
        .add_constant("e", std::f64::consts::E)
        .expect("default constant table");

    let command = Interface::new("formula")?;
    command.set_prompt("> ")?;
    command.write_fmt(format_args!("FORMULA\nType .help for commands.\n"))?;

    loop {
        let string = match command.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if string.trim().is_empty() {
            continue;
        }
        command.add_history_unique(string.clone());
        if let Some(cmd) = string.trim().strip_prefix('.') {
            dot_command(&command, &formula, cmd)?;
            continue;
        }
        match enter(&mut formula, &string) {
            Ok(val) => command.write_fmt(format_args!("{}\n", val))?,
            Err((message, column)) => {
                if column.end <= string.chars().count() {
                    command.write_fmt(format_args!("{}\n", decorate(&string, &column)))?;
                }
                command.write_fmt(format_args!(
                    "{}\n",
                    Style::new().bold().paint(message)
                ))?;
            }
        }
    }
    Ok(())
}

fn enter(formula: &mut Formula<f64>, string: &str) -> Result<f64, (String, Range<usize>)> {
    formula
        .compile(string)
        .map_err(|e| (e.to_string(), e.column()))?;
    formula
        .validate()
        .map_err(|e| (e.to_string(), string.chars().count()..string.chars().count()))?;
    Ok(formula.eval())
}

fn dot_command(
    command: &Interface<linefeed::DefaultTerminal>,
    formula: &Formula<f64>,
    cmd: &str,
) -> std::io::Result<()> {
    let listing = formula.listing();
    let lines = match cmd {
        "prg" => listing.lines(),
        "const" => listing.const_map(),
        "vars" => listing.var_map(),
        "ops" => listing.oper_map(),
        "funcs" => listing.func_map(),
        "help" => vec![
            ".prg\tdisassemble the current program".to_string(),
            ".const\tconstant table".to_string(),
            ".vars\tvariable table".to_string(),
            ".ops\toperator table".to_string(),
            ".funcs\tfunction table".to_string(),
        ],
        _ => vec![format!("UNKNOWN COMMAND .{}", cmd)],
    };
    for line in lines {
        command.write_fmt(format_args!("{}\n", line))?;
    }
    Ok(())
}

/// Echo the input with the error column underlined.
fn decorate(ins: &str, column: &Range<usize>) -> String {
    let mut under_on = false;
    let mut out = String::new();
    let style = Style::new().underline();
    let prefix = format!("{}", style.prefix());
    let suffix = format!("{}", style.suffix());
    let mut index = 0;
    for char in ins.chars() {
        let do_under = column.contains(&index);
        if under_on {
            if !do_under {
                out.push_str(&suffix);
            }
        } else if do_under {
            out.push_str(&prefix);
        }
        under_on = do_under;
        out.push(char);
        index += 1;
    }
    if column.start == index {
        under_on = true;
        out.push_str(&prefix);
        out.push(' ');
    }
    if under_on {
        out.push_str(&suffix);
    }
    out
}
