//! Interactive payment detail collection.

use std::io::{BufRead, Write};

use courtside_booking::{BookingError, BookingResult, DetailField, DetailsSource, StaticDetails};

/// Answers from `--detail` flags first, then prompts on `output` and reads
/// one line from `input`.
pub struct ConsoleDetails<R, W> {
    presets: StaticDetails,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleDetails<R, W> {
    pub fn new(presets: StaticDetails, input: R, output: W) -> Self {
        ConsoleDetails {
            presets,
            input,
            output,
        }
    }

    fn unavailable(field: DetailField, reason: impl ToString) -> BookingError {
        BookingError::DetailsUnavailable {
            field: field.key().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl<R: BufRead, W: Write> DetailsSource for ConsoleDetails<R, W> {
    fn request(&mut self, field: DetailField) -> BookingResult<String> {
        if self.presets.contains(field) {
            return self.presets.request(field);
        }

        write!(self.output, "{}: ", field.prompt()).map_err(|e| Self::unavailable(field, e))?;
        self.output.flush().map_err(|e| Self::unavailable(field, e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Self::unavailable(field, e))?;
        if read == 0 {
            return Err(Self::unavailable(field, "end of input"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
