//! Fixed-layout text table of the current standings.

use std::fmt::Write;

use gol_types::Standings;
use gol_types::text::truncate_chars;

const NAME_WIDTH: usize = 5;

fn flag_text(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}

/// Renders both participants in configured order.
///
/// ```text
///             +----------+----------+
///             |  Alice   |   Bob    |
/// +-----------+----------+----------+
/// |    Normals|    1     |    0     |
/// |Punishments|    0     |    0     |
/// |RIP Weekend|  False   |  False   |
/// +-----------+----------+----------+
/// ```
#[must_use]
pub fn render_table(standings: &Standings) -> String {
    let (first, second) = (standings.first(), standings.second());
    let queue = standings.debt_queue();

    let mut out = String::new();
    out.push_str("            +----------+----------+\n");
    let _ = writeln!(
        out,
        "            |{:^10}|{:^10}|",
        truncate_chars(first.name(), NAME_WIDTH),
        truncate_chars(second.name(), NAME_WIDTH)
    );
    out.push_str("+-----------+----------+----------+\n");
    let _ = writeln!(
        out,
        "|    Normals|{:^10}|{:^10}|",
        queue.owed_by(first.id()),
        queue.owed_by(second.id())
    );
    let _ = writeln!(
        out,
        "|Punishments|{:^10}|{:^10}|",
        first.punishments(),
        second.punishments()
    );
    let _ = writeln!(
        out,
        "|RIP Weekend|{:^10}|{:^10}|",
        flag_text(first.weekend_flag()),
        flag_text(second.weekend_flag())
    );
    out.push_str("+-----------+----------+----------+");
    out
}
