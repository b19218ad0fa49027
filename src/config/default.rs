// Simply contains the default YAML config for generation and consumption
pub const DEFAULT_CONFIG: &str = r##"
# When true headers are written back into the files, otherwise the
# stamped content is printed to stdout.
change_in_place: false

# When a file already starts with a header rendered by the matching
# provider, refresh its @date line instead of leaving it alone.
refresh_existing: false

# Regexes which if matched by a file path will never get a header.
# Patterns match anywhere in the path, so anchor them to a whole file
# or directory name.
excludes:
  - '(^|/)\.gitignore$'
  - '(^|/)[^/]*\.lock$'
  - '(^|/)package-lock\.json$'
  - '(^|/)\.git/'
  - '(^|/)\.fileheader\.yml$'
  - '(^|/)node_modules/'
  - '\.min\.js$'
  - '\.d\.ts$'

# Extra file extension to language mappings. These are merged over the
# built in ones:
#   js, mjs, cjs -> javascript
#   jsx          -> javascriptreact
#   ts, mts, cts -> typescript
#   tsx          -> typescriptreact
extensions: {}
#   vue: vue

# Header providers, checked in the order they are defined. The first
# provider that lists a file's language renders its header.
providers:
  - languages:
      - javascript
      - typescript
      - javascriptreact
      - typescriptreact
    # The block comment wrapped around the header. When per_line_char
    # is set every line between the delimiters is prefixed with it,
    # indented one column so it lines up under the start delimiter.
    block_comment_start: "/*"
    block_comment_end: "*/"
    per_line_char: "*"
    author: Haiyang Liao
    affiliation: Nanjing University
    email: haiyangliao@nju.edu.cn
    # Optionally wrap long author, affiliation and email values so that
    # no header line is longer than this many columns.
    # columns: 80
    #
    # The @date line is rendered when the header is generated using the
    # locale's date format in the given IANA timezone. Supported
    # locales are zh-CN, en-US, en-GB, ja-JP and de-DE.
    date:
      locale: zh-CN
      timezone: Asia/Shanghai
"##;
