//! 终端输入
//!
//! 对 `BufRead` / `Write` 泛型，测试中可以用内存缓冲代替真实终端。
//! 真实终端上 API Key 通过 `rpassword` 关闭回显读取。

use std::io::{self, BufRead, Write};

/// 粘贴结束标记（单独一行）
pub const PASTE_TERMINATOR: &str = "END";

/// 终端交互
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    hide_secrets: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            hide_secrets: false,
        }
    }

    /// 读取密钥时是否关闭回显（仅当输入来自终端时有效）
    pub fn hide_secrets(mut self, hide: bool) -> Self {
        self.hide_secrets = hide;
        self
    }

    /// 输出一段文本
    pub fn show(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }

    /// 提示并读取一行，EOF 时返回 `None`
    pub fn ask_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// 提示并读取密钥，EOF 时返回 `None`
    ///
    /// 开启 `hide_secrets` 时直接从终端读取，输入不回显。
    pub fn ask_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !self.hide_secrets {
            return self.ask_line(prompt);
        }

        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        match rpassword::read_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 读取多行粘贴内容，直到 `END` 行或 EOF
    pub fn read_pasted(&mut self, prompt: &str) -> io::Result<String> {
        writeln!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim() == PASTE_TERMINATOR {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(lines.join("\n"))
    }

    /// y/N 确认，EOF 视为否
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask_line(&format!("{} (y/N) ", prompt))?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes") | Some("是")
        ))
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
