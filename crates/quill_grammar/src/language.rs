//! The context-free grammar of the quill language.
//!
//! This grammar is descriptive. The parser is hand written and does not consult it, so it is
//! allowed to be more permissive than what the parser accepts (chained conditions, for
//! example).

use crate::grammar::{Grammar, GrammarError};

const TERMINALS: &[&str] = &[
    "(", ")", "[", "]", "{", "}", "*", "+", "-", "/", ";", ",", ".", "<", "<=", "==", ">",
    ">=", "<>", "!=", "=", "\"", "++", "--", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "A-Z", "a-z", "_", "call", "do", "else", "elif", "for", "if", "print", "return", "break",
    "skip", "and", "or", "not", "int", "float", "string",
];

const NON_TERMINALS: &[&str] = &[
    "<program>",
    "<statement>",
    "<declaration>",
    "<var_declaration>",
    "<const_declaration>",
    "<assignment>",
    "<function_declare>",
    "<parameters>",
    "<parameter_tail>",
    "<parameter>",
    "<identifier>",
    "<begin>",
    "<letter>",
    "<name>",
    "<digit>",
    "<expression>",
    "<expression_tail>",
    "<primary_expression>",
    "<operator>",
    "<singleOp>",
    "<logicOp>",
    "<number>",
    "<string>",
    "<text>",
    "<block>",
    "<call>",
    "<arguments>",
    "<argument_tail>",
    "<return>",
    "<print>",
    "<if-condition>",
    "<condition>",
    "<condition_tail>",
    "<primary_condition>",
    "<compOp>",
    "<loop>",
    "<keyword>",
    "<LBracket>",
    "<RBracket>",
    "<datatype>",
    "<assign>",
    "<separator>",
];

/// Builds the quill grammar
pub fn quill_grammar() -> Result<Grammar, GrammarError> {
    Grammar::builder()
        .start("<program>")
        .terminals(TERMINALS.iter().copied())
        .non_terminals(NON_TERMINALS.iter().copied())
        .rule("<program>", ["<statement>*"])
        .rule(
            "<statement>",
            [
                "<declaration>",
                "<assignment>",
                "<call>",
                "<return>",
                "<print>",
                "<if-condition>",
                "<loop>",
                "<block>",
            ],
        )
        .rule(
            "<declaration>",
            ["<var_declaration>", "<const_declaration>", "<function_declare>"],
        )
        .rule(
            "<var_declaration>",
            ["<datatype> <identifier> = <expression> ;"],
        )
        .rule("<const_declaration>", ["<datatype> <identifier> = <number> ;"])
        .rule("<assignment>", ["<identifier> = <expression> ;"])
        .rule(
            "<function_declare>",
            ["do <identifier> ( <parameters> ) <block>"],
        )
        .rule("<parameters>", ["<parameter> <parameter_tail>", "epsilon"])
        .rule(
            "<parameter_tail>",
            ["<separator> <parameter> <parameter_tail>", "epsilon"],
        )
        .rule("<parameter>", ["<datatype> <identifier>"])
        // identifiers
        .rule("<identifier>", ["<begin> <name>*"])
        .rule("<begin>", ["_", "<letter>"])
        .rule("<name>", ["<letter>", "<digit>", "_"])
        .rule("<letter>", ["a-z", "A-Z"])
        .rule("<digit>", ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"])
        // expressions
        .rule("<expression>", ["<primary_expression> <expression_tail>"])
        .rule(
            "<expression_tail>",
            [
                "<operator> <primary_expression> <expression_tail>",
                "<logicOp> <expression>",
                "epsilon",
            ],
        )
        .rule(
            "<primary_expression>",
            [
                "<identifier>",
                "<identifier> <singleOp>",
                "<number>",
                "<string>",
            ],
        )
        .rule("<operator>", ["+", "-", "*", "/"])
        .rule("<singleOp>", ["++", "--"])
        .rule("<logicOp>", ["and", "or", "not"])
        .rule("<number>", ["<digit>+", "<digit>+ . <digit>+"])
        .rule("<string>", ["\" <text> \""])
        .rule("<text>", ["<letter>*"])
        // statements
        .rule("<block>", ["{ <statement>* }"])
        .rule("<call>", ["call <identifier> ( <arguments> ) ;"])
        .rule("<arguments>", ["<identifier> <argument_tail>", "epsilon"])
        .rule(
            "<argument_tail>",
            ["<separator> <identifier> <argument_tail>", "epsilon"],
        )
        .rule("<return>", ["return <expression> ;"])
        .rule(
            "<print>",
            ["print ( <expression> ) ;", "print ( <call> ) ;"],
        )
        .rule(
            "<if-condition>",
            [
                "if ( <condition> ) <block>",
                "if ( <condition> ) <block> elif ( <condition> ) <block>",
                "if ( <condition> ) <block> else <block>",
            ],
        )
        .rule("<condition>", ["<primary_condition> <condition_tail>"])
        .rule(
            "<condition_tail>",
            [
                "<logicOp> <primary_condition> <condition_tail>",
                "<compOp> <primary_condition>",
                "epsilon",
            ],
        )
        .rule("<primary_condition>", ["<expression>"])
        .rule("<compOp>", [">", "<", "==", "<>", ">=", "<=", "!="])
        .rule(
            "<loop>",
            ["for ( <var_declaration> ; <condition> ; <expression> ) <block>"],
        )
        // token classes
        .rule(
            "<keyword>",
            [
                "do", "call", "return", "if", "elif", "else", "for", "break", "skip", "print",
            ],
        )
        .rule("<LBracket>", ["(", "["])
        .rule("<RBracket>", [")", "]", "}"])
        .rule("<datatype>", ["int", "float", "string"])
        .rule("<assign>", ["="])
        .rule("<separator>", [","])
        // token classes never appear on the right hand side of a production, so what may
        // follow them is stated directly
        .seed_follow(
            "<keyword>",
            [
                "(", "{", "call", "do", "return", "if", "elif", "else", "for", "break", "skip",
                "print",
            ],
        )
        .seed_follow("<singleOp>", [";", ")"])
        .seed_follow("<LBracket>", [")", "int", "float", "string", "\""])
        .seed_follow("<separator>", ["A-Z", "a-z", "_"])
        .seed_follow("<assign>", [";"])
        .seed_follow("<RBracket>", [";"])
        .build()
}

#[cfg(test)]
mod tests {
    use crate::{language, language_analysis, END_MARKER, EPSILON};
    use std::collections::BTreeSet;
    use test_log::test;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_language_builds() {
        let grammar = language();
        assert_eq!(grammar.start(), "<program>");
        assert!(grammar.is_terminal("<>"));
        assert!(grammar.is_non_terminal("<condition_tail>"));
        for non_terminal in grammar.non_terminals() {
            assert!(
                !grammar.productions(non_terminal).unwrap().is_empty(),
                "{non_terminal} has no productions"
            );
        }
    }

    #[test]
    fn test_terminal_first_sets() {
        let analysis = language_analysis();
        for terminal in language().terminals() {
            assert_eq!(analysis.first(terminal), Some(&set(&[terminal])));
        }
    }

    #[test]
    fn test_first_sets() {
        let analysis = language_analysis();
        assert_eq!(
            analysis.first("<datatype>"),
            Some(&set(&["int", "float", "string"]))
        );
        assert_eq!(
            analysis.first("<identifier>"),
            Some(&set(&["_", "a-z", "A-Z"]))
        );
        let program = analysis.first("<program>").unwrap();
        assert!(program.contains(EPSILON));
        assert!(program.contains("int"));
        assert!(program.contains("for"));
        assert!(program.contains("{"));
        assert!(!analysis.first("<expression>").unwrap().contains(EPSILON));
    }

    #[test]
    fn test_follow_sets() {
        let analysis = language_analysis();
        assert!(analysis.follow("<program>").unwrap().contains(END_MARKER));
        let statement = analysis.follow("<statement>").unwrap();
        assert!(statement.contains("}"));
        assert!(statement.contains(END_MARKER));
        let expression = analysis.follow("<expression>").unwrap();
        for expected in [";", ")", "==", "and"] {
            assert!(
                expression.contains(expected),
                "FOLLOW(<expression>) is missing {expected}"
            );
        }
        assert_eq!(analysis.follow("<assign>"), Some(&set(&[";"])));
    }

    #[test]
    fn test_unknown_names_fall_back_to_self() {
        let analysis = language_analysis();
        assert_eq!(analysis.first_or_self("<nope>"), set(&["<nope>"]));
    }
}
