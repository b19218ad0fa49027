// Copyright (C) 2024 Haiyang Liao <haiyangliao@nju.edu.cn>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use super::Comment;
use crate::comments::line_comment::LineComment;

pub struct BlockComment {
    start: String,
    end: String,
    per_line: Option<Box<dyn Comment>>,
}

impl BlockComment {
    pub fn new(start: &str, end: &str) -> BlockComment {
        BlockComment {
            start: String::from(start),
            end: String::from(end),
            per_line: None,
        }
    }

    /// Prefix every body line with `per_line`, indented one column so it
    /// lines up under the second character of the start delimiter.
    pub fn with_per_line(mut self, per_line: &str) -> BlockComment {
        self.per_line = Some(Box::new(LineComment::new(&format!(" {}", per_line))));
        self
    }
}

impl Comment for BlockComment {
    fn comment(&self, text: &str) -> String {
        let mut new_text = self.start.clone();
        new_text.push('\n');

        match self.per_line {
            Some(ref commenter) => {
                new_text.push_str(&commenter.comment(text));
                new_text.push(' ');
            }
            None => {
                new_text.push_str(text);
                if !text.ends_with('\n') {
                    new_text.push('\n');
                }
            }
        };

        new_text.push_str(&self.end);
        new_text
    }
}
