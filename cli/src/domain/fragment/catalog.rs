//! Built-in setup fragments.
//!
//! Each body is a self-contained bash segment: no shebang, safe to run under
//! `set -e`, and safe to run twice.

use super::{Fragment, FragmentGroup};

const PYTHON: &str = r#"echo "🐍 Setting up Python environment..."
if ! command -v python3 >/dev/null 2>&1; then
    sudo apt-get update
    sudo apt-get install -y python3 python3-pip python3-venv python3-dev
fi
python3 -m pip install --user --upgrade pip
python3 -m pip install --user poetry black ruff mypy pytest jupyter ipython requests
echo "✅ Python environment ready!""#;

const NODEJS: &str = r#"echo "🟢 Setting up Node.js environment..."
export NVM_DIR="$HOME/.nvm"
if [ ! -s "$NVM_DIR/nvm.sh" ]; then
    curl -fsSL -o- https://raw.githubusercontent.com/nvm-sh/nvm/v0.39.7/install.sh | bash
fi
. "$NVM_DIR/nvm.sh"
nvm install --lts
nvm use --lts
npm install -g typescript ts-node eslint prettier nodemon @types/node
echo "✅ Node.js environment ready!""#;

const RUST: &str = r#"echo "🦀 Setting up Rust environment..."
if ! command -v rustup >/dev/null 2>&1 && [ ! -x "$HOME/.cargo/bin/rustup" ]; then
    curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y
fi
. "$HOME/.cargo/env"
rustup component add clippy rustfmt
echo "✅ Rust environment ready!""#;

const GO: &str = r#"echo "🐹 Setting up Go environment..."
GO_VERSION="1.21.5"
if ! /usr/local/go/bin/go version 2>/dev/null | grep -q "go${GO_VERSION}"; then
    wget -q "https://go.dev/dl/go${GO_VERSION}.linux-amd64.tar.gz"
    sudo rm -rf /usr/local/go
    sudo tar -C /usr/local -xzf "go${GO_VERSION}.linux-amd64.tar.gz"
    rm -f "go${GO_VERSION}.linux-amd64.tar.gz"
fi
grep -q '/usr/local/go/bin' ~/.bashrc || echo 'export PATH=$PATH:/usr/local/go/bin:$HOME/go/bin' >> ~/.bashrc
echo "✅ Go environment ready!""#;

const JAVA: &str = r#"echo "☕ Setting up Java environment..."
sudo apt-get update
sudo apt-get install -y openjdk-17-jdk maven gradle
grep -q 'JAVA_HOME=' ~/.bashrc || echo 'export JAVA_HOME=/usr/lib/jvm/java-17-openjdk-amd64' >> ~/.bashrc
echo "✅ Java environment ready!""#;

const CPP: &str = r#"echo "⚙️ Setting up C/C++ environment..."
sudo apt-get update
sudo apt-get install -y build-essential gdb cmake clang-format
echo "✅ C/C++ environment ready!""#;

const PHP: &str = r#"echo "🐘 Setting up PHP environment..."
sudo apt-get update
sudo apt-get install -y php php-cli php-mbstring php-xml php-curl composer
echo "✅ PHP environment ready!""#;

const RUBY: &str = r#"echo "💎 Setting up Ruby environment..."
sudo apt-get update
sudo apt-get install -y ruby ruby-dev bundler
gem list -i rails >/dev/null 2>&1 || sudo gem install rails
echo "✅ Ruby environment ready!""#;

const AI_CLAUDE: &str = r#"echo "🤖 Setting up Claude CLI..."
if ! command -v claude >/dev/null 2>&1; then
    npm install -g @anthropic-ai/claude-code || {
        echo "npm install failed, trying the standalone installer..."
        curl -fsSL https://claude.ai/install.sh | bash
    }
fi
grep -q "alias cl='claude'" ~/.bashrc || echo "alias cl='claude'" >> ~/.bashrc
echo "✅ Claude CLI setup complete!"
echo "💡 To use: claude --help or cl --help""#;

const AI_QWEN: &str = r#"echo "🧠 Setting up Qwen via Ollama..."
if ! command -v ollama >/dev/null 2>&1; then
    curl -fsSL https://ollama.com/install.sh | sh
fi
if ! pgrep -x ollama >/dev/null 2>&1; then
    nohup ollama serve > /dev/null 2>&1 &
    sleep 10
fi
ollama pull qwen:latest
grep -q "alias qw='ollama run qwen'" ~/.bashrc || cat >> ~/.bashrc << 'QWEN_ALIASES'
alias qw='ollama run qwen'
alias qwen='ollama run qwen'
alias chat='ollama run qwen'
QWEN_ALIASES
echo "✅ Qwen setup complete!"
echo "💡 To use: qw, qwen or ollama run qwen""#;

const DEVTOOLS: &str = r#"echo "🛠️ Installing development tools and VS Code extensions..."
sudo apt-get update
sudo apt-get install -y curl wget git vim tmux htop tree jq unzip build-essential
if command -v code >/dev/null 2>&1; then
    for ext in ms-python.python rust-lang.rust-analyzer golang.go \
        esbenp.prettier-vscode redhat.vscode-yaml ms-azuretools.vscode-docker \
        yzhang.markdown-all-in-one; do
        code --install-extension "$ext" --force || echo "Failed to install $ext"
    done
fi
echo "✅ Development tools setup complete!""#;

const GIT_CONFIG: &str = r#"echo "📝 Configuring Git..."
git config --global init.defaultBranch main
git config --global pull.rebase false
git config --global core.editor vim
echo "✅ Git configuration complete!""#;

const ALIASES: &str = r#"echo "⚡ Setting up aliases and shortcuts..."
if ! grep -q '# >>> csm aliases >>>' ~/.bashrc; then
cat >> ~/.bashrc << 'CSM_ALIASES'
# >>> csm aliases >>>
alias gst='git status'
alias gco='git checkout'
alias gcb='git checkout -b'
alias gp='git push'
alias gpl='git pull'
alias ga='git add'
alias gc='git commit'
alias gd='git diff'
alias gl='git log --oneline'
alias ll='ls -alF'
alias la='ls -A'
alias l='ls -CF'
alias ..='cd ..'
alias ...='cd ../..'
alias py='python3'
alias t='tree'
alias h='htop'
mkcd() { mkdir -p "$1" && cd "$1"; }
# <<< csm aliases <<<
CSM_ALIASES
fi
if [ ! -f ~/.vimrc ]; then
    printf 'set number\nset autoindent\nset tabstop=4\nset shiftwidth=4\nsyntax on\n' > ~/.vimrc
fi
echo "✅ Aliases ready. Run 'source ~/.bashrc' to activate them.""#;

/// The catalog in canonical order: languages, AI agents, tooling.
pub(super) fn builtin_fragments() -> Vec<Fragment> {
    use FragmentGroup::{AiAgent, Language, Tooling};
    vec![
        Fragment::new(
            "python",
            "Python",
            Language,
            "Python 3 with pip, poetry and dev tools",
            PYTHON,
        ),
        Fragment::new("nodejs", "Node.js", Language, "Node.js LTS via nvm with TypeScript", NODEJS),
        Fragment::new("rust", "Rust", Language, "Rust toolchain with clippy and rustfmt", RUST),
        Fragment::new("go", "Go", Language, "Go toolchain in /usr/local/go", GO),
        Fragment::new("java", "Java", Language, "OpenJDK 17 with Maven and Gradle", JAVA),
        Fragment::new("cpp", "C/C++", Language, "GCC, GDB, CMake and clang-format", CPP),
        Fragment::new("php", "PHP", Language, "PHP with Composer and common extensions", PHP),
        Fragment::new("ruby", "Ruby", Language, "Ruby with Bundler and Rails", RUBY),
        Fragment::new(
            "ai-claude",
            "Claude CLI",
            AiAgent,
            "Anthropic's Claude command line tool",
            AI_CLAUDE,
        ),
        Fragment::new("ai-qwen", "Qwen (Ollama)", AiAgent, "Qwen model served by Ollama", AI_QWEN),
        Fragment::new(
            "devtools",
            "Development Tools",
            Tooling,
            "CLI utilities and VS Code extensions",
            DEVTOOLS,
        ),
        Fragment::new(
            "git-config",
            "Git Configuration",
            Tooling,
            "Sensible global git defaults",
            GIT_CONFIG,
        ),
        Fragment::new(
            "aliases",
            "Programming Aliases",
            Tooling,
            "Shell aliases and a minimal vimrc",
            ALIASES,
        ),
    ]
}
