//! Pin table source generation.
//!
//! The generated file has four sections, always in this order:
//!
//! 1. one `machine_pin_obj_t` descriptor per capability row
//! 2. `pin_af_table`, a flat table of descriptor references
//! 3. the CPU pins dictionary, keyed by CPU name (`PA01`)
//! 4. the board pins dictionary, keyed by board name (`LED_RED`)
//!
//! Every reference to a pin symbol sits inside `#ifdef <symbol>` so a board
//! that does not define the pin never references its descriptor. Sections 3
//! and 4 are additionally wrapped in the board-capability flag.

use std::fmt::Write;

use pintable_tables::{BoardPins, CapabilityRow, OverrideEntry, DEFAULT_TYPE_TAG};

use crate::code::byte_code;
use crate::error::Result;
use crate::family::McuFamily;

/// Banner written at the top of every generated file.
pub const TABLE_HEADER: &str = "\
// This file was automatically generated by pintable
//

// The Pin objects which are available on a board

";

/// Macro guarding the dictionaries unless overridden.
pub const DEFAULT_BOARD_CPU_FLAG: &str = "MICROPY_HW_PIN_BOARD_CPU";

/// Knobs that do not change per pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Macro controlling the `#if` around the pin dictionaries.
    pub board_cpu_flag: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            board_cpu_flag: DEFAULT_BOARD_CPU_FLAG.to_string(),
        }
    }
}

/// A capability row joined with its board override, if any.
struct PinView<'a> {
    row: &'a CapabilityRow,
    symbol: String,
    board: Option<&'a OverrideEntry>,
}

impl PinView<'_> {
    fn display_name(&self) -> &str {
        self.board.map_or("", |entry| entry.display_name.as_str())
    }

    fn type_tag(&self) -> &str {
        self.board.map_or(DEFAULT_TYPE_TAG, |entry| entry.type_tag.as_str())
    }
}

fn join<'a>(rows: &'a [CapabilityRow], board: &'a BoardPins) -> Vec<PinView<'a>> {
    rows.iter()
        .map(|row| {
            let symbol = row.symbol();
            let entry = board.get(&symbol);
            PinView {
                row,
                symbol,
                board: entry,
            }
        })
        .collect()
}

/// Render the complete pin table source for `rows` and `board`.
pub fn render_table(
    rows: &[CapabilityRow],
    board: &BoardPins,
    family: McuFamily,
    options: &EmitOptions,
) -> Result<String> {
    let pins = join(rows, board);
    let mut out = String::new();

    out.push_str(TABLE_HEADER);
    for pin in &pins {
        write_descriptor(&mut out, pin, family)?;
    }
    write_af_table(&mut out, &pins)?;

    writeln!(out, "\n#if {}", options.board_cpu_flag)?;
    write_cpu_pins(&mut out, &pins)?;
    write_board_pins(&mut out, &pins)?;
    writeln!(out, "#endif")?;

    let named = pins.iter().filter(|pin| pin.board.is_some()).count();
    tracing::info!(
        family = family.name(),
        pins = pins.len(),
        board_pins = named,
        "rendered pin table"
    );
    Ok(out)
}

fn write_descriptor(out: &mut String, pin: &PinView<'_>, family: McuFamily) -> std::fmt::Result {
    let symbol = &pin.symbol;
    writeln!(out, "#ifdef {symbol}")?;
    write!(
        out,
        "{} machine_pin_obj_t {symbol}_obj = {{{}, {symbol}, MP_QSTR_{}",
        family.storage_class(),
        pin.type_tag(),
        pin.display_name()
    )?;

    // EIC channel then the ADC channel(s) always occupy a slot.
    let positional = 1 + family.adc_channels();
    for index in 0..positional {
        write!(out, ", {}", byte_code(pin.row.field(index)))?;
    }
    for cell in pin.row.fields().iter().skip(positional) {
        write!(out, ", {}", byte_code(Some(cell)))?;
    }

    writeln!(out, "}};")?;
    writeln!(out, "#endif")
}

fn write_af_table(out: &mut String, pins: &[PinView<'_>]) -> std::fmt::Result {
    out.push_str("\n// The table of references to the pin objects.\n\n");
    out.push_str("static const machine_pin_obj_t *pin_af_table[] = {\n");
    for pin in pins {
        writeln!(out, "    #ifdef {}", pin.symbol)?;
        writeln!(out, "    &{}_obj,", pin.symbol)?;
        out.push_str("    #endif\n");
    }
    out.push_str("};\n");
    Ok(())
}

fn write_cpu_pins(out: &mut String, pins: &[PinView<'_>]) -> std::fmt::Result {
    out.push_str("\n// The cpu pins dictionary\n\n");
    out.push_str("STATIC const mp_rom_map_elem_t pin_cpu_pins_locals_dict_table[] = {\n");
    for pin in pins {
        write_dict_entry(out, &pin.row.cpu_name(), &pin.symbol)?;
    }
    out.push_str("};\n");
    out.push_str(
        "MP_DEFINE_CONST_DICT(machine_pin_cpu_pins_locals_dict, pin_cpu_pins_locals_dict_table);\n",
    );
    Ok(())
}

fn write_board_pins(out: &mut String, pins: &[PinView<'_>]) -> std::fmt::Result {
    out.push_str("\n// The board pins dictionary\n\n");
    out.push_str("STATIC const mp_rom_map_elem_t pin_board_pins_locals_dict_table[] = {\n");
    for pin in pins {
        if let Some(entry) = pin.board {
            write_dict_entry(out, &entry.display_name, &pin.symbol)?;
        }
    }
    out.push_str("};\n");
    out.push_str(
        "MP_DEFINE_CONST_DICT(machine_pin_board_pins_locals_dict, pin_board_pins_locals_dict_table);\n",
    );
    Ok(())
}

fn write_dict_entry(out: &mut String, key: &str, symbol: &str) -> std::fmt::Result {
    writeln!(out, "    #ifdef {symbol}")?;
    writeln!(
        out,
        "    {{ MP_ROM_QSTR(MP_QSTR_{key}), MP_ROM_PTR(&{symbol}_obj) }},"
    )?;
    out.push_str("    #endif\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pintable_tables::board::overrides_from_str;
    use pintable_tables::capability::capabilities_from_str;

    fn render(caps: &str, pins: &str, family: McuFamily) -> String {
        let rows = capabilities_from_str(caps);
        let board = overrides_from_str(pins);
        render_table(&rows, &board, family, &EmitOptions::default()).unwrap()
    }

    #[test]
    fn single_adc_descriptor() {
        let out = render("PA01,1A,3\n", "PIN_PA01,LED_RED\n", McuFamily::Samd21);
        assert!(out.contains(
            "#ifdef PIN_PA01\nstatic const machine_pin_obj_t PIN_PA01_obj = \
             {{&machine_pin_type}, PIN_PA01, MP_QSTR_LED_RED, 0x1A, 0x03};\n#endif\n"
        ));
    }

    #[test]
    fn dual_adc_descriptor_with_extra_codes() {
        let out = render("PB02,2,,5,12,,4\n", "", McuFamily::Samd51);
        assert!(out.contains(
            "const machine_pin_obj_t PIN_PB02_obj = \
             {{&machine_pin_type}, PIN_PB02, MP_QSTR_, 0x02, 0xff, 0x05, 0x12, 0xff, 0x04};\n"
        ));
        assert!(!out.contains("static const machine_pin_obj_t PIN_PB02_obj"));
    }

    #[test]
    fn short_row_gets_sentinels() {
        let out = render("PA07\n", "", McuFamily::Samd51);
        assert!(out.contains("MP_QSTR_, 0xff, 0xff, 0xff};"));
        let out = render("PA07,4\n", "", McuFamily::Samd21);
        assert!(out.contains("MP_QSTR_, 0x04, 0xff};"));
    }

    #[test]
    fn sections_in_order() {
        let out = render("PA01,1,2\n", "PIN_PA01,D1\n", McuFamily::Samd21);
        let descriptor = out.find("PIN_PA01_obj = ").unwrap();
        let af = out.find("pin_af_table[]").unwrap();
        let flag = out.find("#if MICROPY_HW_PIN_BOARD_CPU").unwrap();
        let cpu = out.find("pin_cpu_pins_locals_dict_table[]").unwrap();
        let board = out.find("pin_board_pins_locals_dict_table[]").unwrap();
        assert!(out.starts_with(TABLE_HEADER));
        assert!(descriptor < af && af < flag && flag < cpu && cpu < board);
        assert!(out.ends_with("pin_board_pins_locals_dict_table);\n#endif\n"));
    }

    #[test]
    fn board_dict_only_lists_named_pins() {
        let out = render("PA01,1\nPA02,2\n", "PIN_PA02,D2\n", McuFamily::Samd21);
        assert!(out.contains("{ MP_ROM_QSTR(MP_QSTR_PA01), MP_ROM_PTR(&PIN_PA01_obj) },"));
        assert!(out.contains("{ MP_ROM_QSTR(MP_QSTR_D2), MP_ROM_PTR(&PIN_PA02_obj) },"));
        let board = &out[out.find("pin_board_pins_locals_dict_table[]").unwrap()..];
        assert!(!board.contains("PIN_PA01"));
    }

    #[test]
    fn custom_board_cpu_flag() {
        let rows = capabilities_from_str("PA01,1\n");
        let options = EmitOptions {
            board_cpu_flag: "MY_BOARD_CPU".to_string(),
        };
        let out = render_table(&rows, &BoardPins::new(), McuFamily::Samd21, &options).unwrap();
        assert!(out.contains("\n#if MY_BOARD_CPU\n"));
        assert!(!out.contains(DEFAULT_BOARD_CPU_FLAG));
    }

    #[test]
    fn every_reference_is_guarded() {
        let out = render(
            "PA01,1,2\nPB03,,4,5\npc10,a\n",
            "PIN_PA01,LED\nLED_PC10\n",
            McuFamily::Samd51,
        );
        let lines: Vec<&str> = out.lines().collect();
        for (index, line) in lines.iter().enumerate() {
            let Some(start) = line.find("&PIN_") else {
                continue;
            };
            let symbol: String = line[start + 1..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            let symbol = symbol.trim_end_matches("_obj");
            assert_eq!(
                lines[index - 1].trim(),
                format!("#ifdef {symbol}"),
                "unguarded reference on line {index}"
            );
        }
    }

    #[test]
    fn empty_inputs_still_render_all_sections() {
        let out = render("", "", McuFamily::Samd21);
        assert!(out.contains("pin_af_table[] = {\n};"));
        assert!(out.contains("pin_cpu_pins_locals_dict_table[] = {\n};"));
        assert!(out.contains("pin_board_pins_locals_dict_table[] = {\n};"));
    }
}
