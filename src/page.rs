use crate::signal::IrSignal;

/// The fixed remote layout: label and NEC scancode per quick-send button.
pub const QUICK_BUTTONS: &'static [(&'static str, &'static str)] = &[
    ("Decrease Volume", "0x1EA0CF3"),
    ("Increase Volume", "0x1EA0DF2"),
    ("Play/Pause", "0x1EAFE01"),
    ("Show Display", "0x1EA1DE2"),
    ("Use Bluetooth", "0x1EA22DD"),
    ("Use TV", "0x1EAA25D"),
    ("Speaker On/Off", "0x1EA12ED"),
    ("TV On/Off", "0x20DF10EF"),
    ("Netflix", "0x20DF6A95"),
    ("Prime", "0x20DF3AC5")
];

const PAGE_HEAD: &'static str = "\
<!DOCTYPE html>
<html lang='en'>
<head>
  <meta charset='UTF-8'>
  <meta name='viewport' content='width=device-width, initial-scale=1.0' />
  <title>IR Remote</title>
  <link rel='stylesheet' href='./style.css'>
</head>
<body>
";

pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c)
        }
    }

    return escaped;
}

fn quick_send_button(name: &str, hex_code: &str) -> String {
    return format!(
        "<div class='quick-send-button' onclick=\"fetch('./send_ir?hex_code={}')\">{}</div>",
        hex_code,
        html_escape(name)
    );
}

/// The received-history table, newest signal in the top row. Empty history
/// renders nothing, matching the remote before anything has been captured.
fn signal_table(signals: &[IrSignal]) -> String {
    if signals.is_empty() { return String::new(); }

    let mut table = String::with_capacity(128 + signals.len() * 160);
    table.push_str("<h3>Last Received Signals</h3>");
    table.push_str("<table>");
    table.push_str("<tr><th>Protocol</th><th>Hex Code</th><th>Send</th></tr>");

    for signal in signals {
        let hex_code = signal.hex_code();
        table.push_str("<tr>");
        table.push_str(&format!("<td>{}</td>", html_escape(&signal.protocol.to_string())));
        table.push_str(&format!("<td>{}</td>", hex_code));
        table.push_str(&format!(
            "<td><button type='button' onclick='fetch(\"./send_ir?hex_code={}\")'>Send</button></td>",
            hex_code
        ));
        table.push_str("</tr>");
    }

    table.push_str("</table>");
    return table;
}

/// Builds the whole remote page. `signals` must already be ordered
/// most-recent-first; the table keeps that order.
pub fn index_page(signals: &[IrSignal]) -> String {
    let table = signal_table(signals);

    let mut page = String::with_capacity(PAGE_HEAD.len() + QUICK_BUTTONS.len() * 120 + table.len() + 64);
    page.push_str(PAGE_HEAD);

    page.push_str("<div class='quick-buttons-container'>");
    for (name, hex_code) in QUICK_BUTTONS {
        page.push_str(&quick_send_button(name, hex_code));
    }
    page.push_str("</div>");

    page.push_str(&table);
    page.push_str("</body></html>");

    return page;
}

pub const STYLESHEET: &'static str = "\
body {
  margin: 0;
}

.quick-buttons-container {
  display: grid;
  width: 100%;
  grid-template-columns: repeat(auto-fit, minmax(10rem, 1fr));
}

.quick-send-button {
  background-color: #CCCCCC;
  text-align: center;
  margin: 0.3rem;
  padding-top: 2rem;
  padding-bottom: 2rem;
  user-select: none;
}

.quick-send-button:hover {
  background-color: #AAAAAA;
}

.quick-send-button:active {
  background-color: #888888;
}

th, td {
  padding: 0.5em;
  text-align: left;
  border-bottom: 1px solid #ddd;
}
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::IrProtocol;

    fn nec(code: u64) -> IrSignal {
        return IrSignal { protocol: IrProtocol::Nec, code: code, repeat: false };
    }

    #[test]
    fn table_keeps_most_recent_first_order() {
        let signals = [nec(0x30), nec(0x20), nec(0x10)];
        let table = signal_table(&signals);

        let newest = table.find("0x30").unwrap();
        let middle = table.find("0x20").unwrap();
        let oldest = table.find("0x10").unwrap();
        assert!(newest < middle && middle < oldest);
    }

    #[test]
    fn empty_history_renders_no_table() {
        assert_eq!(signal_table(&[]), "");
        assert!(!index_page(&[]).contains("<table>"));
    }

    #[test]
    fn page_carries_every_quick_button() {
        let page = index_page(&[]);

        for (name, hex_code) in QUICK_BUTTONS {
            assert!(page.contains(hex_code), "missing button code {}", hex_code);
            assert!(page.contains(&html_escape(name)), "missing button label {}", name);
        }
    }

    #[test]
    fn decoder_names_are_escaped() {
        let odd = IrSignal {
            protocol: IrProtocol::Other(String::from("<weird & rare>")),
            code: 0x2A,
            repeat: false
        };

        let table = signal_table(&[odd]);
        assert!(table.contains("&lt;weird &amp; rare&gt;"));
        assert!(!table.contains("<weird"));
    }

    #[test]
    fn rows_wire_up_their_resend_fetch() {
        let table = signal_table(&[nec(0x1EA0CF3)]);
        assert!(table.contains("fetch(\"./send_ir?hex_code=0x1EA0CF3\")"));
    }
}
