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

pub struct LineComment {
    character: String,
}

impl LineComment {
    pub fn new(character: &str) -> LineComment {
        LineComment {
            character: String::from(character),
        }
    }
}

impl Comment for LineComment {
    fn comment(&self, text: &str) -> String {
        let mut new_text = String::new();
        for line in text.lines() {
            let new_line = match line {
                "" => format!("{}\n", self.character),
                _ => format!("{} {}\n", self.character, line),
            };

            new_text.push_str(&new_line);
        }

        new_text
    }
}
