//! Documentation content for the anise CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Math,
    Statistics,
    Arrays,
    Strings,
    Dates,
    Random,
    Ai,
    Templates,
}

impl DocCategory {
    /// Parse category name from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "math" | "arithmetic" => Some(Self::Math),
            "statistics" | "stats" => Some(Self::Statistics),
            "arrays" | "array" | "combinators" => Some(Self::Arrays),
            "strings" | "string" => Some(Self::Strings),
            "dates" | "date" | "time" => Some(Self::Dates),
            "random" | "rand" => Some(Self::Random),
            "ai" | "completion" => Some(Self::Ai),
            "templates" | "template" => Some(Self::Templates),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"ANISE DOCUMENTATION

Anise is a small expression language. An expression combines literals,
variables, operators and function calls and evaluates to a single value:
an int, float, string, bool, time or array.

DOCUMENTATION CATEGORIES

  syntax            Literals, variables, dotted paths, calls and array literals
  operators         Arithmetic, comparison, shift and logical operators
  math              Arithmetic, trigonometric and rounding functions
  statistics        mean, median, mode, variance, stddev, max, min, sum
  arrays            filter, map, reduce and structural array functions
  strings           Text functions
  dates             Parsing and differencing dates and times
  random            rand and shuffle
  ai                The ai() completion function and its configuration
  templates         Rendering expressions as template condition syntax

QUICK REFERENCE

  price * 1.21              Arithmetic on a variable
  user.age >= 18            Dotted variable path
  sqrt(16)                  Function call
  int[1, 2, 3]              Typed array literal
  filter(xs, "x > 2")       Combinator with a per-element expression

Run 'anise doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::parse(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Math) => Ok(MATH_DOC),
        Some(DocCategory::Statistics) => Ok(STATISTICS_DOC),
        Some(DocCategory::Arrays) => Ok(ARRAYS_DOC),
        Some(DocCategory::Strings) => Ok(STRINGS_DOC),
        Some(DocCategory::Dates) => Ok(DATES_DOC),
        Some(DocCategory::Random) => Ok(RANDOM_DOC),
        Some(DocCategory::Ai) => Ok(AI_DOC),
        Some(DocCategory::Templates) => Ok(TEMPLATES_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Literals, Variables and Calls

LITERALS
  42        Integer (64-bit)
  -7        Negative integer (the minus belongs to the literal)
  2.5       Float (exactly one '.')
  "text"    String; 'text' and `text` work too. No escape sequences.
  true      Boolean (true / false)

VARIABLES
  name
    Looked up in the evaluation context.

  user.address.city
    Dotted path: each segment after the first is a key in the object
    found so far.

    Example:
      Context: {"user": {"age": 30}}
      Expr:    user.age
      Output:  30

    Constraints:
      - A missing segment is an "Undefined variable" error
      - Descending through a non-object is an error

FUNCTION CALLS
  name(arg, arg, ...)
    The '(' must follow the name directly. Arguments are evaluated left
    to right before the call. Zero arguments are allowed.

ARRAY LITERALS
  int[1, 2, 3]
  float[1.5, 2]
  string["a", "b"]
  time[date("2024-01-01")]
  any[1, "a", true]

    The prefix declares the element type and is checked at evaluation:
      int       ints only
      float     floats; ints are promoted
      string    strings only
      time      times only
      any       anything (also used for unknown prefixes)
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Arithmetic, Comparison, Shift and Logical

PRECEDENCE (loosest first)
  ||
  &&
  ==  !=
  <   <=  >   >=
  <<  >>
  +   -
  *   /   //  %
  **  ^           (right-associative: 2 ** 3 ** 2 is 2 ** 9)

ARITHMETIC
  +     Add numbers, or concatenate two strings
  -     Subtract
  *     Multiply
  /     Divide (int / int truncates: 7 / 2 is 3)
  //    Integer division (floats are truncated first: 7.9 // 2 is 3)
  %     Remainder
  **    Power; always a float (2 ** 3 is 8.0)

  int op int gives an int; any float operand gives a float.
  Mixing other kinds is a type error.

COMPARISON
  Defined for string/string, number/number (ints promoted against floats)
  and time/time. Anything else is a type error.

SHIFT
  <<  >>    Both operands must be ints; shifts of 64 or more overflow.

LOGICAL
  &&  ||    Both operands must be bool.

    Both sides are always evaluated:
      true || nope(1)    fails with "Unknown function: nope"
"#;

const MATH_DOC: &str = r#"MATH - Arithmetic, Trigonometric and Rounding Functions

ARITHMETIC
  add(a, b)  sub(a, b)  mul(a, b)  div(a, b)  divint(a, b)  mod(a, b)
    Same rules as the operators + - * / // %.

  exp(a, b) / pow(a, b)     a raised to b (float)
  root(x, n)                nth root of x
  sqrt(x)                   Square root
  hypot(a, b)               sqrt(a*a + b*b)
  log(x, base)              Logarithm in any base
  log10(x)  log2(x)
  abs(x)                    Keeps int or float
  double(x)                 x * 2

TRIGONOMETRY (radians)
  sin  cos  tan  asin  acos  atan  sinh  cosh  tanh
  deg2rad(x)  rad2deg(x)

ROUNDING
  ceil(x)  floor(x)  round(x)
    Return ints. round() rounds halves away from zero.
"#;

const STATISTICS_DOC: &str = r#"STATISTICS - Descriptive Statistics

  mean(...)      Arithmetic mean
  median(...)    Middle value (mean of the two middle values for even counts)
  mode(...)      Most frequent value; ties go to the smallest
  variance(...)  Sample variance (divides by n - 1; needs two values)
  stddev(...)    Population standard deviation (divides by n)
  max(...)       Largest value
  min(...)       Smallest value
  sum(...)       Total

  Arguments may be numbers or arrays of numbers; arrays are flattened
  one level:
    mean(1, 2, 3)          2.0
    mean(int[1, 2, 3])     2.0

  max, min and sum return an int when every input is an int.
"#;

const ARRAYS_DOC: &str = r#"ARRAYS - Combinators and Structural Functions

COMBINATORS
  filter(array, "expr")
    Keep elements for which expr is true. The element is bound to x.

    Example:
      filter(int[1, 2, 3, 4], "x > 2")    [3, 4]

  map(array, "expr")
    Evaluate expr per element with _x (element) and _i (index) bound.

    Example:
      map(int[1, 2, 3], "_x * 2")         [2, 4, 6]

  reduce(array, fn, [init])
    Left fold with a function name ("add") or function value. Without
    init the first element is the starting value.

    Example:
      reduce(int[1, 2, 3], "add")         6

    Constraints:
      - The sub-expression sees only its loop variables, not the outer
        context
      - Nesting depth is limited (ANISE_MAX_NESTING, default 16)

STRUCTURE
  len(x)                    Length of a string or array
  concat(a, b, ...)         Join strings, or join arrays
  reverse(x)                Reverse a string or array
  sort(array)               Ascending; elements must all be int, float or string
  unique(array)             Drop repeated values, keep first occurrences
  slice(array, start, end)  Elements start..end
"#;

const STRINGS_DOC: &str = r#"STRINGS - Text Functions

  upper(s)  lower(s)  trim(s)
  contains(s, sub)          Substring test; also membership for arrays
  startswith(s, prefix)
  endswith(s, suffix)
  matches(s, pattern)       Regular expression test
  split(s, delim)           Split into an array; "" splits into characters

  Strings also concatenate with +:
    "ab" + "cd"             "abcd"
"#;

const DATES_DOC: &str = r#"DATES - Dates and Times

  date("2024-03-01")                Midnight on that date
  time("13:45:00")                  Time of day on 1970-01-01
  datetime("2024-03-01 13:45:00")   Full timestamp

  diffdate(a, b)     Absolute difference in whole days
  difftime(a, b)     Absolute difference in whole seconds

  Times compare with == != < <= > >=:
    date("2024-01-01") < date("2024-06-01")    true
"#;

const RANDOM_DOC: &str = r#"RANDOM - Random Values

  rand("int")           Random non-negative int
  rand("int", n)        Random int in 0..n
  rand("float")         Random float in [0, 1)
  rand("float", n)      Random float in [0, n)
  shuffle(array)        Array in random order
"#;

const AI_DOC: &str = r#"AI - Language Model Completions

  ai(provider, part, ...)
    Send the parts, joined with " : ", to a completion service and return
    its answer. Providers: "gpt", "openai".

    Example:
      ai("gpt", "Translate to Dutch", greeting)

CONFIGURATION
  ANISE_COMPLETION_API_KEY        Enables the service (required)
  ANISE_COMPLETION_ENDPOINT       Chat-completions URL
  ANISE_COMPLETION_MODEL          Model name (default gpt-3.5-turbo)
  ANISE_COMPLETION_TIMEOUT_SECS   Request timeout (default 30)

  Without an API key ai() fails with "no completion service configured".
"#;

const TEMPLATES_DOC: &str = r#"TEMPLATES - Template Condition Syntax

  anise template '<expr>'
    Print the expression in template-engine condition syntax.

    Example:
      Expr:    age >= 18 && country == "NL"
      Output:  and ( ge .age 18 ) ( eq .country "NL" )

  Operators become prefix calls:
    &&  and     ||  or
    ==  eq      !=  ne
    <   lt      >   gt      <=  le      >=  ge
    +   add     -   sub     *   mul     /   div     %   mod
    Others keep their spelling (**, //, <<, >>).

  Variables render as .name, floats with six decimals, and nested
  operations and calls are wrapped in parentheses.
"#;
