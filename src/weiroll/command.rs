use alloy::primitives::{Address, B256};

use crate::error::{Error, Result};

/// Slot byte meaning "no input here" / "discard the return value".
pub const UNUSED_SLOT: u8 = 0xff;

/// Flag set when input indices live in the following command word.
pub const FLAG_EXTENDED: u8 = 0x40;

const SHORT_INPUTS: usize = 6;
const EXTENDED_INPUTS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CallType {
    DelegateCall = 0x00,
    Call = 0x01,
    StaticCall = 0x02,
    ValueCall = 0x03,
}

#[derive(Debug, Clone)]
pub struct Command {
    pub selector: [u8; 4],
    pub call_type: CallType,
    pub inputs: Vec<u8>,
    pub output: u8,
    pub target: Address,
}

impl Command {
    /// Encode into one command word, or two for extended commands.
    pub fn encode(&self) -> Result<Vec<B256>> {
        if self.inputs.len() > EXTENDED_INPUTS {
            return Err(Error::TooManyInputs(self.inputs.len()));
        }
        let extended = self.inputs.len() > SHORT_INPUTS;

        let mut word = [UNUSED_SLOT; 32];
        word[0..4].copy_from_slice(&self.selector);
        word[4] = self.call_type as u8 | if extended { FLAG_EXTENDED } else { 0 };
        if !extended {
            word[5..5 + self.inputs.len()].copy_from_slice(&self.inputs);
        }
        word[11] = self.output;
        word[12..32].copy_from_slice(self.target.as_slice());

        let mut words = vec![B256::from(word)];
        if extended {
            let mut indices = [UNUSED_SLOT; 32];
            indices[..self.inputs.len()].copy_from_slice(&self.inputs);
            words.push(B256::from(indices));
        }
        Ok(words)
    }
}
