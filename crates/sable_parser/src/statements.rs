//! Statement and declaration grammar.
//!
//! Every statement parser is total: it always produces a node and
//! records errors on the side. Incremental reuse hooks sit at the top
//! of the per-list element parsers (`parse_statement`,
//! `parse_class_member`, and friends) so a re-parse can splice in
//! subtrees from the previous tree before the grammar runs.

use crate::lists::ParsingContext;
use sable_ast::flags::NodeFlags;
use sable_ast::node::*;
use sable_ast::syntax_kind::SyntaxKind;
use sable_core::text::TextPos;
use sable_diagnostics::messages;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    // ========================================================================
    // Statement dispatch
    // ========================================================================

    pub(crate) fn is_start_of_statement(&mut self) -> bool {
        match self.token() {
            SyntaxKind::AtToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            // `catch` and `finally` with no `try` still parse as a try
            // statement so their blocks get sensible errors.
            | SyntaxKind::CatchKeyword
            | SyntaxKind::FinallyKeyword => true,
            SyntaxKind::ConstKeyword | SyntaxKind::ExportKeyword | SyntaxKind::ImportKeyword => {
                self.is_start_of_declaration()
            }
            SyntaxKind::AsyncKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::TypeKeyword => {
                // Contextual keywords are identifiers unless a
                // declaration actually follows.
                self.is_start_of_declaration() || self.is_start_of_expression()
            }
            SyntaxKind::AbstractKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::StaticKeyword => {
                self.is_start_of_declaration() || self.is_start_of_expression()
            }
            _ => self.is_start_of_expression(),
        }
    }

    fn is_start_of_declaration(&mut self) -> bool {
        self.look_ahead(|p| p.scan_declaration_start())
    }

    fn scan_declaration_start(&mut self) -> bool {
        loop {
            match self.token() {
                SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword => return true,
                SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => {
                    self.next_token();
                    return !self.has_preceding_line_break() && self.is_identifier_token();
                }
                SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                    self.next_token();
                    return !self.has_preceding_line_break()
                        && (self.is_identifier_token()
                            || self.token() == SyntaxKind::StringLiteral);
                }
                SyntaxKind::AsyncKeyword => {
                    self.next_token();
                    return !self.has_preceding_line_break()
                        && self.token() == SyntaxKind::FunctionKeyword;
                }
                SyntaxKind::ImportKeyword => {
                    self.next_token();
                    return matches!(
                        self.token(),
                        SyntaxKind::StringLiteral
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::OpenBraceToken
                    ) || self.is_identifier_token();
                }
                SyntaxKind::ExportKeyword => {
                    self.next_token();
                    if matches!(
                        self.token(),
                        SyntaxKind::EqualsToken
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::OpenBraceToken
                            | SyntaxKind::DefaultKeyword
                    ) {
                        return true;
                    }
                    continue;
                }
                SyntaxKind::DeclareKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword => {
                    self.next_token();
                    continue;
                }
                _ => return false,
            }
        }
    }

    pub(crate) fn parse_statement(&mut self) -> Statement<'a> {
        if let Some(reused) = self.try_reuse_statement() {
            return reused;
        }
        if !self.enter_recursion() {
            self.exit_recursion();
            // Consume one token so the enclosing list makes progress.
            let pos = self.token_pos();
            self.next_token();
            let data = self.finish_node(SyntaxKind::EmptyStatement, pos);
            return Statement::Empty(self.alloc(EmptyStatement { data }));
        }
        let statement = self.parse_statement_inner();
        self.exit_recursion();
        statement
    }

    fn parse_statement_inner(&mut self) -> Statement<'a> {
        match self.token() {
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::VarKeyword => self.parse_variable_statement(self.token_pos(), None),
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.parse_variable_statement(self.token_pos(), None)
            }
            SyntaxKind::FunctionKeyword => {
                self.parse_function_declaration(self.token_pos(), None)
            }
            SyntaxKind::ClassKeyword => {
                self.parse_class_declaration(self.token_pos(), None, None)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword => self.parse_continue_statement(),
            SyntaxKind::BreakKeyword => self.parse_break_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword
            | SyntaxKind::CatchKeyword
            | SyntaxKind::FinallyKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            SyntaxKind::AtToken => self.parse_declaration_statement(),
            SyntaxKind::ConstKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::StaticKeyword
                if self.is_start_of_declaration() =>
            {
                self.parse_declaration_statement()
            }
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    // ========================================================================
    // Simple statements
    // ========================================================================

    fn parse_empty_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::SemicolonToken);
        let data = self.finish_node(SyntaxKind::EmptyStatement, pos);
        Statement::Empty(self.alloc(EmptyStatement { data }))
    }

    pub(crate) fn parse_block(&mut self) -> &'a Block<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let statements =
            self.parse_list(ParsingContext::BLOCK_STATEMENTS, |p| p.parse_statement());
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::Block, pos);
        self.alloc(Block { data, statements })
    }

    fn parse_if_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::IfKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(|p| p.parse_expression());
        self.expect_token(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            Some(self.parse_statement())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::IfStatement, pos);
        Statement::If(self.alloc(IfStatement {
            data,
            expression,
            then_statement,
            else_statement,
        }))
    }

    fn parse_do_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::DoKeyword);
        let statement = self.parse_statement();
        self.expect_token(SyntaxKind::WhileKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(|p| p.parse_expression());
        self.expect_token(SyntaxKind::CloseParenToken);
        // The trailing semicolon of do-while is optional everywhere.
        self.parse_optional(SyntaxKind::SemicolonToken);
        let data = self.finish_node(SyntaxKind::DoStatement, pos);
        Statement::Do(self.alloc(DoStatement {
            data,
            statement,
            expression,
        }))
    }

    fn parse_while_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::WhileKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(|p| p.parse_expression());
        self.expect_token(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        let data = self.finish_node(SyntaxKind::WhileStatement, pos);
        Statement::While(self.alloc(WhileStatement {
            data,
            expression,
            statement,
        }))
    }

    fn parse_for_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ForKeyword);
        let await_modifier = if self.token() == SyntaxKind::AwaitKeyword {
            Some(self.consume_token())
        } else {
            None
        };
        self.expect_token(SyntaxKind::OpenParenToken);

        let initializer = if self.token() == SyntaxKind::SemicolonToken {
            None
        } else if matches!(
            self.token(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword
        ) || (self.token() == SyntaxKind::LetKeyword && self.is_let_declaration())
        {
            let list = self.disallow_in_and(|p| p.parse_variable_declaration_list(true));
            Some(ForInitializer::VariableDeclarationList(list))
        } else {
            let expression = self.disallow_in_and(|p| p.parse_expression());
            Some(ForInitializer::Expression(expression))
        };

        if let Some(initializer) = initializer {
            if self.parse_optional(SyntaxKind::InKeyword) {
                let expression = self.allow_in_and(|p| p.parse_expression());
                self.expect_token(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement();
                let data = self.finish_node(SyntaxKind::ForInStatement, pos);
                return Statement::ForIn(self.alloc(ForInStatement {
                    data,
                    initializer,
                    expression,
                    statement,
                }));
            }
            if self.parse_optional(SyntaxKind::OfKeyword) {
                let expression =
                    self.allow_in_and(|p| p.parse_assignment_expression_or_higher());
                self.expect_token(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement();
                let data = self.finish_node(SyntaxKind::ForOfStatement, pos);
                return Statement::ForOf(self.alloc(ForOfStatement {
                    data,
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                }));
            }
            return self.parse_plain_for_rest(pos, Some(initializer));
        }
        self.parse_plain_for_rest(pos, None)
    }

    fn parse_plain_for_rest(
        &mut self,
        pos: TextPos,
        initializer: Option<ForInitializer<'a>>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::SemicolonToken);
        let condition = if self.token() != SyntaxKind::SemicolonToken
            && self.token() != SyntaxKind::CloseParenToken
        {
            Some(self.allow_in_and(|p| p.parse_expression()))
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        let incrementor = if self.token() != SyntaxKind::CloseParenToken {
            Some(self.allow_in_and(|p| p.parse_expression()))
        } else {
            None
        };
        self.expect_token(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        let data = self.finish_node(SyntaxKind::ForStatement, pos);
        Statement::For(self.alloc(ForStatement {
            data,
            initializer,
            condition,
            incrementor,
            statement,
        }))
    }

    fn parse_continue_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ContinueKeyword);
        let label = self.parse_optional_label();
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::ContinueStatement, pos);
        Statement::Continue(self.alloc(ContinueStatement { data, label }))
    }

    fn parse_break_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::BreakKeyword);
        let label = self.parse_optional_label();
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::BreakStatement, pos);
        Statement::Break(self.alloc(BreakStatement { data, label }))
    }

    /// A label after break/continue must sit on the same line.
    fn parse_optional_label(&mut self) -> Option<&'a Identifier<'a>> {
        if !self.can_parse_semicolon() && self.is_identifier_token() {
            Some(self.parse_identifier())
        } else {
            None
        }
    }

    fn parse_return_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ReturnKeyword);
        let expression = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.allow_in_and(|p| p.parse_expression()))
        };
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::ReturnStatement, pos);
        Statement::Return(self.alloc(ReturnStatement { data, expression }))
    }

    fn parse_with_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::WithKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(|p| p.parse_expression());
        self.expect_token(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        let data = self.finish_node(SyntaxKind::WithStatement, pos);
        Statement::With(self.alloc(WithStatement {
            data,
            expression,
            statement,
        }))
    }

    fn parse_switch_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::SwitchKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(|p| p.parse_expression());
        self.expect_token(SyntaxKind::CloseParenToken);

        let case_block_pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let clauses = self.parse_list(ParsingContext::SWITCH_CLAUSES, |p| {
            p.parse_case_or_default_clause()
        });
        self.expect_token(SyntaxKind::CloseBraceToken);
        let case_block_data = self.finish_node(SyntaxKind::CaseBlock, case_block_pos);
        let case_block = self.alloc(CaseBlock {
            data: case_block_data,
            clauses,
        });

        let data = self.finish_node(SyntaxKind::SwitchStatement, pos);
        Statement::Switch(self.alloc(SwitchStatement {
            data,
            expression,
            case_block,
        }))
    }

    fn parse_case_or_default_clause(&mut self) -> CaseOrDefaultClause<'a> {
        if let Some(reused) = self.try_reuse_switch_clause() {
            return reused;
        }
        let pos = self.token_pos();
        if self.token() == SyntaxKind::CaseKeyword {
            self.next_token();
            let expression = self.allow_in_and(|p| p.parse_expression());
            self.expect_token(SyntaxKind::ColonToken);
            let statements = self.parse_list(ParsingContext::SWITCH_CLAUSE_STATEMENTS, |p| {
                p.parse_statement()
            });
            let data = self.finish_node(SyntaxKind::CaseClause, pos);
            return CaseOrDefaultClause::Case(self.alloc(CaseClause {
                data,
                expression,
                statements,
            }));
        }
        self.expect_token(SyntaxKind::DefaultKeyword);
        self.expect_token(SyntaxKind::ColonToken);
        let statements = self.parse_list(ParsingContext::SWITCH_CLAUSE_STATEMENTS, |p| {
            p.parse_statement()
        });
        let data = self.finish_node(SyntaxKind::DefaultClause, pos);
        CaseOrDefaultClause::Default(self.alloc(DefaultClause { data, statements }))
    }

    fn parse_throw_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ThrowKeyword);
        // No line break is allowed between `throw` and its operand.
        let expression = if self.has_preceding_line_break() {
            self.error(&messages::LINE_BREAK_NOT_PERMITTED_HERE, &[]);
            Expression::Identifier(self.create_missing_identifier())
        } else {
            self.allow_in_and(|p| p.parse_expression())
        };
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::ThrowStatement, pos);
        Statement::Throw(self.alloc(ThrowStatement { data, expression }))
    }

    fn parse_try_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::TryKeyword);
        let try_block = self.parse_block();
        let catch_clause = if self.token() == SyntaxKind::CatchKeyword {
            Some(self.parse_catch_clause())
        } else {
            None
        };
        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            Some(self.parse_block())
        } else {
            None
        };
        if catch_clause.is_none() && finally_block.is_none() {
            self.error(&messages::CATCH_OR_FINALLY_EXPECTED, &[]);
        }
        let data = self.finish_node(SyntaxKind::TryStatement, pos);
        Statement::Try(self.alloc(TryStatement {
            data,
            try_block,
            catch_clause,
            finally_block,
        }))
    }

    fn parse_catch_clause(&mut self) -> &'a CatchClause<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::CatchKeyword);
        let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
            let declaration = self.parse_variable_declaration(false);
            self.expect_token(SyntaxKind::CloseParenToken);
            Some(declaration)
        } else {
            None
        };
        let block = self.parse_block();
        let data = self.finish_node(SyntaxKind::CatchClause, pos);
        self.alloc(CatchClause {
            data,
            variable_declaration,
            block,
        })
    }

    fn parse_debugger_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::DebuggerKeyword);
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::DebuggerStatement, pos);
        Statement::Debugger(self.alloc(DebuggerStatement { data }))
    }

    fn parse_expression_or_labeled_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        if self.is_identifier_token()
            && self.look_ahead(|p| {
                p.next_token();
                p.token() == SyntaxKind::ColonToken
            })
        {
            let label = self.parse_identifier();
            self.expect_token(SyntaxKind::ColonToken);
            let statement = self.parse_statement();
            let data = self.finish_node(SyntaxKind::LabeledStatement, pos);
            return Statement::Labeled(self.alloc(LabeledStatement {
                data,
                label,
                statement,
            }));
        }
        let expression = self.allow_in_and(|p| p.parse_expression());
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::ExpressionStatement, pos);
        Statement::Expression(self.alloc(ExpressionStatement { data, expression }))
    }

    // ========================================================================
    // Variable declarations
    // ========================================================================

    /// `let` opens a declaration only when a binding follows; otherwise
    /// it is a plain identifier expression.
    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_binding_name_start() || p.token() == SyntaxKind::LetKeyword
        })
    }

    fn parse_variable_statement(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        let declaration_list = self.parse_variable_declaration_list(false);
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::VariableStatement, pos);
        Statement::Variable(self.alloc(VariableStatement {
            data,
            modifiers,
            declaration_list,
        }))
    }

    pub(crate) fn parse_variable_declaration_list(
        &mut self,
        in_for_initializer: bool,
    ) -> &'a VariableDeclarationList<'a> {
        let pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.next_token();

        // `for (let of items)` would otherwise parse `of` as a binding.
        let declarations = if in_for_initializer
            && self.token() == SyntaxKind::OfKeyword
            && self.look_ahead(|p| {
                p.next_token();
                p.is_start_of_expression()
            }) {
            NodeArray::empty(self.token_pos())
        } else {
            self.parse_delimited_list(ParsingContext::VARIABLE_DECLARATIONS, |p| {
                p.parse_variable_declaration(!in_for_initializer)
            })
        };
        if declarations.is_empty() && !in_for_initializer {
            self.error(&messages::VARIABLE_DECLARATION_LIST_CANNOT_BE_EMPTY, &[]);
        }

        let data = self.finish_node(SyntaxKind::VariableDeclarationList, pos);
        data.add_flags(flags);
        self.alloc(VariableDeclarationList { data, declarations })
    }

    pub(crate) fn parse_variable_declaration(
        &mut self,
        allow_exclamation: bool,
    ) -> &'a VariableDeclaration<'a> {
        if let Some(reused) = self.try_reuse_variable_declaration() {
            return reused;
        }
        let pos = self.token_pos();
        let name = self.parse_binding_name();
        let exclamation_token = if allow_exclamation
            && matches!(name, BindingName::Identifier(_))
            && self.token() == SyntaxKind::ExclamationToken
            && !self.has_preceding_line_break()
        {
            Some(self.consume_token())
        } else {
            None
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = if matches!(
            self.token(),
            SyntaxKind::InKeyword | SyntaxKind::OfKeyword
        ) {
            None
        } else {
            self.parse_initializer()
        };
        let data = self.finish_node(SyntaxKind::VariableDeclaration, pos);
        self.alloc(VariableDeclaration {
            data,
            name,
            exclamation_token,
            type_annotation,
            initializer,
        })
    }

    // ========================================================================
    // Binding names
    // ========================================================================

    pub(crate) fn is_binding_name_start(&mut self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
        ) || self.is_identifier_token()
    }

    pub(crate) fn is_property_name_start(&mut self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral
        ) || self.token() == SyntaxKind::Identifier
            || self.token().is_keyword()
    }

    pub(crate) fn parse_binding_name(&mut self) -> BindingName<'a> {
        match self.token() {
            SyntaxKind::OpenBraceToken => {
                BindingName::Object(self.parse_object_binding_pattern())
            }
            SyntaxKind::OpenBracketToken => {
                BindingName::Array(self.parse_array_binding_pattern())
            }
            _ => BindingName::Identifier(self.parse_identifier()),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> &'a ObjectBindingPattern<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let elements = self.parse_delimited_list(ParsingContext::OBJECT_BINDING_ELEMENTS, |p| {
            p.parse_object_binding_element()
        });
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::ObjectBindingPattern, pos);
        self.alloc(ObjectBindingPattern { data, elements })
    }

    fn parse_object_binding_element(&mut self) -> &'a BindingElement<'a> {
        let pos = self.token_pos();
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name_or_property = self.parse_property_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::ColonToken) {
            (Some(name_or_property), self.parse_binding_name())
        } else {
            match name_or_property {
                PropertyName::Identifier(identifier) => {
                    (None, BindingName::Identifier(identifier))
                }
                other => {
                    // `{ "x" }` has no binding identifier to shorthand.
                    self.error(&messages::IDENTIFIER_EXPECTED, &[]);
                    let missing = self.create_missing_identifier();
                    (Some(other), BindingName::Identifier(missing))
                }
            }
        };
        let initializer = self.parse_initializer();
        let data = self.finish_node(SyntaxKind::BindingElement, pos);
        self.alloc(BindingElement {
            data,
            dot_dot_dot_token,
            property_name,
            name,
            initializer,
        })
    }

    fn parse_array_binding_pattern(&mut self) -> &'a ArrayBindingPattern<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken);
        let elements = self.parse_delimited_list(ParsingContext::ARRAY_BINDING_ELEMENTS, |p| {
            p.parse_array_binding_element()
        });
        self.expect_token(SyntaxKind::CloseBracketToken);
        let data = self.finish_node(SyntaxKind::ArrayBindingPattern, pos);
        self.alloc(ArrayBindingPattern { data, elements })
    }

    fn parse_array_binding_element(&mut self) -> ArrayBindingElement<'a> {
        if self.token() == SyntaxKind::CommaToken {
            let pos = self.token_pos();
            let data = self.finish_node_at(SyntaxKind::OmittedExpression, pos, pos);
            return ArrayBindingElement::Omitted(self.alloc(OmittedExpression { data }));
        }
        let pos = self.token_pos();
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_binding_name();
        let initializer = self.parse_initializer();
        let data = self.finish_node(SyntaxKind::BindingElement, pos);
        ArrayBindingElement::Binding(self.alloc(BindingElement {
            data,
            dot_dot_dot_token,
            property_name: None,
            name,
            initializer,
        }))
    }

    // ========================================================================
    // Modifiers and decorators
    // ========================================================================

    pub(crate) fn parse_decorators(&mut self) -> Option<NodeArray<'a, &'a Decorator<'a>>> {
        if self.token() != SyntaxKind::AtToken {
            return None;
        }
        let list_pos = self.token_pos();
        let mut decorators = Vec::new();
        while self.token() == SyntaxKind::AtToken {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.do_inside_of_context(NodeFlags::DECORATOR_CONTEXT, |p| {
                p.parse_left_hand_side_expression()
            });
            let data = self.finish_node(SyntaxKind::Decorator, pos);
            decorators.push(&*self.alloc(Decorator { data, expression }));
        }
        Some(self.make_node_array(decorators, list_pos))
    }

    /// Modifiers in member position: the keyword only counts when what
    /// follows on the same line can still be a member.
    pub(crate) fn parse_modifiers(&mut self) -> Option<NodeArray<'a, Modifier>> {
        let list_pos = self.token_pos();
        let mut modifiers: Vec<Modifier> = Vec::new();
        loop {
            if !self.token().is_modifier_kind() {
                break;
            }
            if self.token() == SyntaxKind::ConstKeyword {
                // `const` modifies nothing but enums.
                if !self.look_ahead(|p| {
                    p.next_token();
                    p.token() == SyntaxKind::EnumKeyword
                }) {
                    break;
                }
            } else if !self.look_ahead(|p| {
                p.next_token();
                p.can_follow_modifier()
            }) {
                break;
            }
            modifiers.push(self.consume_token());
        }
        if modifiers.is_empty() {
            None
        } else {
            Some(self.make_node_array(modifiers, list_pos))
        }
    }

    fn can_follow_modifier(&mut self) -> bool {
        if self.has_preceding_line_break() {
            return false;
        }
        matches!(
            self.token(),
            SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::DotDotDotToken
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::ModuleKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
        ) || self.token().is_modifier_kind()
            || self.token() == SyntaxKind::Identifier
            || self.token().is_keyword()
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_declaration_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let decorators = self.parse_decorators();
        let modifiers = self.parse_declaration_modifiers();

        match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, modifiers)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration_with(pos, modifiers),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, decorators, modifiers),
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, modifiers),
            SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                self.parse_module_declaration(pos, modifiers)
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration(pos, modifiers),
            SyntaxKind::ExportKeyword => self.parse_export_forms(pos, modifiers),
            SyntaxKind::DefaultKeyword => {
                // `export default <expr>`: the export keyword was taken
                // as a modifier, the expression was not a declaration.
                self.next_token();
                let expression = self.allow_in_and(|p| p.parse_assignment_expression_or_higher());
                self.parse_expected_semicolon();
                let data = self.finish_node(SyntaxKind::ExportAssignment, pos);
                Statement::ExportAssignment(self.alloc(ExportAssignment {
                    data,
                    modifiers,
                    is_export_equals: false,
                    expression,
                }))
            }
            _ => {
                self.error(&messages::DECLARATION_EXPECTED, &[]);
                self.skip_to_next_statement();
                let data = self.finish_node(SyntaxKind::EmptyStatement, pos);
                Statement::Empty(self.alloc(EmptyStatement { data }))
            }
        }
    }

    /// Modifiers in statement position. `export =`, `export *`, and
    /// `export {` are whole-statement forms, not modifiers; `default`
    /// is a modifier only ahead of a declaration head.
    fn parse_declaration_modifiers(&mut self) -> Option<NodeArray<'a, Modifier>> {
        let list_pos = self.token_pos();
        let mut modifiers: Vec<Modifier> = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::ExportKeyword => {
                    if self.look_ahead(|p| {
                        p.next_token();
                        matches!(
                            p.token(),
                            SyntaxKind::EqualsToken
                                | SyntaxKind::AsteriskToken
                                | SyntaxKind::OpenBraceToken
                        )
                    }) {
                        break;
                    }
                    modifiers.push(self.consume_token());
                }
                SyntaxKind::DefaultKeyword => {
                    if !self.look_ahead(|p| {
                        p.next_token();
                        matches!(
                            p.token(),
                            SyntaxKind::ClassKeyword
                                | SyntaxKind::FunctionKeyword
                                | SyntaxKind::InterfaceKeyword
                                | SyntaxKind::EnumKeyword
                                | SyntaxKind::AbstractKeyword
                                | SyntaxKind::AsyncKeyword
                        )
                    }) {
                        break;
                    }
                    modifiers.push(self.consume_token());
                }
                SyntaxKind::ConstKeyword => {
                    if !self.look_ahead(|p| {
                        p.next_token();
                        p.token() == SyntaxKind::EnumKeyword
                    }) {
                        break;
                    }
                    modifiers.push(self.consume_token());
                }
                kind if kind.is_modifier_kind() => {
                    if !self.look_ahead(|p| {
                        p.next_token();
                        p.can_follow_modifier()
                    }) {
                        break;
                    }
                    modifiers.push(self.consume_token());
                }
                _ => break,
            }
        }
        if modifiers.is_empty() {
            None
        } else {
            Some(self.make_node_array(modifiers, list_pos))
        }
    }

    fn parse_function_declaration(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        self.parse_function_declaration_with(pos, modifiers)
    }

    fn parse_function_declaration_with(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        let is_async = has_modifier_kind(&modifiers, SyntaxKind::AsyncKeyword);
        self.expect_token(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let is_generator = asterisk_token.is_some();
        // `export default function` may omit the name.
        let name = if self.is_identifier_token() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters_in_function_context(is_generator, is_async);
        let return_type = self.parse_type_annotation();
        let body = self.parse_optional_function_block(is_generator, is_async);
        let data = self.finish_node(SyntaxKind::FunctionDeclaration, pos);
        Statement::Function(self.alloc(FunctionDeclaration {
            data,
            modifiers,
            asterisk_token,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn parse_class_declaration(
        &mut self,
        pos: TextPos,
        decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        let (decorators, modifiers, name, type_parameters, heritage_clauses, members) =
            self.parse_class_parts(decorators, modifiers);
        let data = self.finish_node(SyntaxKind::ClassDeclaration, pos);
        Statement::Class(self.alloc(ClassDeclaration {
            data,
            decorators,
            modifiers,
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    pub(crate) fn parse_class_parts(
        &mut self,
        decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> (
        Option<NodeArray<'a, &'a Decorator<'a>>>,
        Option<NodeArray<'a, Modifier>>,
        Option<&'a Identifier<'a>>,
        Option<NodeArray<'a, &'a TypeParameterDeclaration<'a>>>,
        Option<NodeArray<'a, &'a HeritageClause<'a>>>,
        NodeArray<'a, ClassElement<'a>>,
    ) {
        self.expect_token(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier_token()
            && !matches!(
                self.token(),
                SyntaxKind::ImplementsKeyword
            )
        {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let members =
            self.parse_list(ParsingContext::CLASS_MEMBERS, |p| p.parse_class_member());
        self.expect_token(SyntaxKind::CloseBraceToken);
        (
            decorators,
            modifiers,
            name,
            type_parameters,
            heritage_clauses,
            members,
        )
    }

    pub(crate) fn parse_heritage_clauses(
        &mut self,
    ) -> Option<NodeArray<'a, &'a HeritageClause<'a>>> {
        if !matches!(
            self.token(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            return None;
        }
        let list_pos = self.token_pos();
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            let pos = self.token_pos();
            let token = self.token();
            self.next_token();
            let types = self.parse_delimited_list(ParsingContext::HERITAGE_CLAUSE_ELEMENT, |p| {
                p.parse_expression_with_type_arguments()
            });
            let data = self.finish_node(SyntaxKind::HeritageClause, pos);
            clauses.push(&*self.alloc(HeritageClause { data, token, types }));
        }
        Some(self.make_node_array(clauses, list_pos))
    }

    fn parse_expression_with_type_arguments(&mut self) -> &'a ExpressionWithTypeArguments<'a> {
        let pos = self.token_pos();
        let expression = self.parse_left_hand_side_expression();
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            self.try_parse(|p| p.parse_type_arguments_plain())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::ExpressionWithTypeArguments, pos);
        self.alloc(ExpressionWithTypeArguments {
            data,
            expression,
            type_arguments,
        })
    }

    fn parse_type_arguments_plain(&mut self) -> Option<NodeArray<'a, TypeNode<'a>>> {
        self.next_token();
        let type_arguments =
            self.parse_delimited_list(ParsingContext::TYPE_ARGUMENTS, |p| p.parse_type());
        if self.token() != SyntaxKind::GreaterThanToken || type_arguments.is_empty() {
            return None;
        }
        self.next_token();
        Some(type_arguments)
    }

    pub(crate) fn is_start_of_class_member(&mut self) -> bool {
        match self.token() {
            SyntaxKind::SemicolonToken
            | SyntaxKind::AtToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::ConstructorKeyword
            | SyntaxKind::GetKeyword
            | SyntaxKind::SetKeyword => true,
            kind if kind.is_modifier_kind() => true,
            _ => self.is_property_name_start(),
        }
    }

    fn parse_class_member(&mut self) -> ClassElement<'a> {
        if let Some(reused) = self.try_reuse_class_member() {
            return reused;
        }
        let pos = self.token_pos();

        if self.token() == SyntaxKind::SemicolonToken {
            self.next_token();
            let data = self.finish_node(SyntaxKind::SemicolonClassElement, pos);
            return ClassElement::Semicolon(self.alloc(SemicolonClassElement { data }));
        }

        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers();

        // Clones are shallow; the elements stay in the arena.
        if let Some(accessor) =
            self.try_parse_class_accessor(pos, decorators.clone(), modifiers.clone())
        {
            return accessor;
        }

        if self.token() == SyntaxKind::ConstructorKeyword
            && self.look_ahead(|p| {
                p.next_token();
                matches!(
                    p.token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                )
            })
        {
            self.next_token();
            let parameters = self.parse_parameters_in_function_context(false, false);
            let body = self.parse_optional_function_block(false, false);
            let data = self.finish_node(SyntaxKind::Constructor, pos);
            return ClassElement::Constructor(self.alloc(ConstructorDeclaration {
                data,
                modifiers,
                parameters,
                body,
            }));
        }

        if self.token() == SyntaxKind::OpenBracketToken && self.look_ahead_is_index_signature() {
            let declaration = self.parse_index_signature(pos, modifiers);
            return ClassElement::IndexSignature(declaration);
        }

        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let name = self.parse_class_member_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);

        if asterisk_token.is_some()
            || matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            let method =
                self.parse_method_rest(pos, decorators, modifiers, asterisk_token, name, question_token);
            return ClassElement::Method(method);
        }

        let exclamation_token = if question_token.is_none()
            && self.token() == SyntaxKind::ExclamationToken
            && !self.has_preceding_line_break()
        {
            Some(self.consume_token())
        } else {
            None
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::PropertyDeclaration, pos);
        ClassElement::Property(self.alloc(PropertyDeclaration {
            data,
            decorators,
            modifiers,
            name,
            question_token,
            exclamation_token,
            type_annotation,
            initializer,
        }))
    }

    /// A class member name. A `#name` token becomes an identifier whose
    /// text keeps the leading `#`.
    fn parse_class_member_name(&mut self) -> PropertyName<'a> {
        if self.token() == SyntaxKind::PrivateIdentifier {
            let pos = self.token_pos();
            let end = self.token_end();
            return PropertyName::Identifier(self.intern_identifier(pos, end));
        }
        self.parse_property_name()
    }

    fn try_parse_class_accessor(
        &mut self,
        pos: TextPos,
        decorators: Option<NodeArray<'a, &'a Decorator<'a>>>,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Option<ClassElement<'a>> {
        let kind = match self.token() {
            SyntaxKind::GetKeyword => SyntaxKind::GetAccessor,
            SyntaxKind::SetKeyword => SyntaxKind::SetAccessor,
            _ => return None,
        };
        if !self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break()
                && (p.is_property_name_start()
                    || matches!(
                        p.token(),
                        SyntaxKind::OpenBracketToken | SyntaxKind::PrivateIdentifier
                    ))
        }) {
            return None;
        }
        self.next_token();
        let name = self.parse_class_member_name();
        let parameters = self.parse_parameters_in_function_context(false, false);
        if kind == SyntaxKind::GetAccessor {
            let return_type = self.parse_type_annotation();
            let body = self.parse_optional_function_block(false, false);
            let data = self.finish_node(SyntaxKind::GetAccessor, pos);
            Some(ClassElement::GetAccessor(self.alloc(
                GetAccessorDeclaration {
                    data,
                    decorators,
                    modifiers,
                    name,
                    parameters,
                    return_type,
                    body,
                },
            )))
        } else {
            let body = self.parse_optional_function_block(false, false);
            let data = self.finish_node(SyntaxKind::SetAccessor, pos);
            Some(ClassElement::SetAccessor(self.alloc(
                SetAccessorDeclaration {
                    data,
                    decorators,
                    modifiers,
                    name,
                    parameters,
                    body,
                },
            )))
        }
    }

    // ========================================================================
    // Interfaces, type aliases, enums
    // ========================================================================

    fn parse_interface_declaration(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let members = self.parse_list(ParsingContext::TYPE_MEMBERS, |p| p.parse_type_member());
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::InterfaceDeclaration, pos);
        Statement::Interface(self.alloc(InterfaceDeclaration {
            data,
            modifiers,
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    fn parse_type_alias_declaration(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.expect_token(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::TypeAliasDeclaration, pos);
        Statement::TypeAlias(self.alloc(TypeAliasDeclaration {
            data,
            modifiers,
            name,
            type_parameters,
            type_node,
        }))
    }

    fn parse_enum_declaration(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let members =
            self.parse_delimited_list(ParsingContext::ENUM_MEMBERS, |p| p.parse_enum_member());
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::EnumDeclaration, pos);
        Statement::Enum(self.alloc(EnumDeclaration {
            data,
            modifiers,
            name,
            members,
        }))
    }

    fn parse_enum_member(&mut self) -> &'a EnumMember<'a> {
        if let Some(reused) = self.try_reuse_enum_member() {
            return reused;
        }
        let pos = self.token_pos();
        let name = self.parse_property_name();
        let initializer = self.parse_initializer();
        if initializer.is_none()
            && !matches!(
                self.token(),
                SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken
            )
        {
            self.error(&messages::AN_ENUM_MEMBER_NAME_MUST_BE_FOLLOWED_BY_A_COMMA, &[]);
        }
        let data = self.finish_node(SyntaxKind::EnumMember, pos);
        self.alloc(EnumMember {
            data,
            name,
            initializer,
        })
    }

    // ========================================================================
    // Modules and namespaces
    // ========================================================================

    fn parse_module_declaration(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        if self.token() == SyntaxKind::ModuleKeyword
            && self.look_ahead(|p| {
                p.next_token();
                p.token() == SyntaxKind::StringLiteral
            })
        {
            // Ambient external module: `module "name" { ... }`.
            self.next_token();
            let name_pos = self.token_pos();
            let name_end = self.token_end();
            let text = self.arena.alloc_str(self.scanner.token_value());
            self.next_token();
            let name_data = self.finish_node_at(SyntaxKind::StringLiteral, name_pos, name_end);
            let name = ModuleName::String(self.alloc(StringLiteral {
                data: name_data,
                text,
            }));
            let body = if self.token() == SyntaxKind::OpenBraceToken {
                Some(ModuleBody::Block(self.parse_module_block()))
            } else {
                self.parse_expected_semicolon();
                None
            };
            let data = self.finish_node(SyntaxKind::ModuleDeclaration, pos);
            return Statement::Module(self.alloc(ModuleDeclaration {
                data,
                modifiers,
                name,
                body,
            }));
        }
        self.next_token();
        Statement::Module(self.parse_module_or_namespace(pos, modifiers, false))
    }

    fn parse_module_or_namespace(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
        nested: bool,
    ) -> &'a ModuleDeclaration<'a> {
        let name = ModuleName::Identifier(self.parse_identifier());
        let body = if self.parse_optional(SyntaxKind::DotToken) {
            let inner_pos = self.token_pos();
            Some(ModuleBody::Namespace(
                self.parse_module_or_namespace(inner_pos, None, true),
            ))
        } else {
            Some(ModuleBody::Block(self.parse_module_block()))
        };
        let data = self.finish_node(SyntaxKind::ModuleDeclaration, pos);
        if nested {
            data.add_flags(NodeFlags::NESTED_NAMESPACE);
        }
        self.alloc(ModuleDeclaration {
            data,
            modifiers,
            name,
            body,
        })
    }

    fn parse_module_block(&mut self) -> &'a ModuleBlock<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let statements =
            self.parse_list(ParsingContext::BLOCK_STATEMENTS, |p| p.parse_statement());
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::ModuleBlock, pos);
        self.alloc(ModuleBlock { data, statements })
    }

    // ========================================================================
    // Imports
    // ========================================================================

    fn parse_import_declaration(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        self.expect_token(SyntaxKind::ImportKeyword);

        if self.token() == SyntaxKind::StringLiteral {
            // Side-effect import: `import "module";`
            let module_specifier = self.parse_module_specifier();
            self.parse_expected_semicolon();
            let data = self.finish_node(SyntaxKind::ImportDeclaration, pos);
            return Statement::Import(self.alloc(ImportDeclaration {
                data,
                modifiers,
                import_clause: None,
                module_specifier,
            }));
        }

        if self.is_identifier_token()
            && self.look_ahead(|p| {
                p.next_token();
                p.token() == SyntaxKind::EqualsToken
            })
        {
            return self.parse_import_equals_declaration(pos, modifiers);
        }

        let clause_pos = self.token_pos();
        let name = if self.is_identifier_token() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            Some(self.parse_named_import_bindings())
        } else {
            None
        };
        let clause_data = self.finish_node(SyntaxKind::ImportClause, clause_pos);
        let import_clause = self.alloc(ImportClause {
            data: clause_data,
            name,
            named_bindings,
        });

        self.expect_token(SyntaxKind::FromKeyword);
        let module_specifier = self.parse_module_specifier();
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::ImportDeclaration, pos);
        Statement::Import(self.alloc(ImportDeclaration {
            data,
            modifiers,
            import_clause: Some(import_clause),
            module_specifier,
        }))
    }

    fn parse_named_import_bindings(&mut self) -> NamedImportBindings<'a> {
        if self.token() == SyntaxKind::AsteriskToken {
            let pos = self.token_pos();
            self.next_token();
            self.expect_token(SyntaxKind::AsKeyword);
            let name = self.parse_identifier();
            let data = self.finish_node(SyntaxKind::NamespaceImport, pos);
            return NamedImportBindings::Namespace(self.alloc(NamespaceImport { data, name }));
        }
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let elements = self.parse_delimited_list(
            ParsingContext::IMPORT_OR_EXPORT_SPECIFIERS,
            |p| p.parse_import_specifier(),
        );
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::NamedImports, pos);
        NamedImportBindings::Named(self.alloc(NamedImports { data, elements }))
    }

    fn parse_import_specifier(&mut self) -> &'a ImportSpecifier<'a> {
        let pos = self.token_pos();
        let first = self.parse_identifier_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
            (Some(first), self.parse_identifier())
        } else {
            // Without `as`, the imported name is also the local
            // binding, so reserved words are not allowed.
            if first
                .original_keyword_kind
                .is_some_and(|kind| kind.is_reserved_word())
            {
                self.error_at(
                    first.data.pos(),
                    first.data.end(),
                    &messages::IDENTIFIER_EXPECTED,
                    &[],
                );
            }
            (None, first)
        };
        let data = self.finish_node(SyntaxKind::ImportSpecifier, pos);
        self.alloc(ImportSpecifier {
            data,
            property_name,
            name,
        })
    }

    fn parse_import_equals_declaration(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        let name = self.parse_identifier();
        self.expect_token(SyntaxKind::EqualsToken);
        let module_reference = self.parse_module_reference();
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::ImportEqualsDeclaration, pos);
        Statement::ImportEquals(self.alloc(ImportEqualsDeclaration {
            data,
            modifiers,
            name,
            module_reference,
        }))
    }

    fn parse_module_reference(&mut self) -> ModuleReference<'a> {
        if self.token() == SyntaxKind::Identifier
            && self.scanner.token_value() == "require"
            && self.look_ahead(|p| {
                p.next_token();
                p.token() == SyntaxKind::OpenParenToken
            })
        {
            let pos = self.token_pos();
            self.next_token();
            self.expect_token(SyntaxKind::OpenParenToken);
            let expression = self.parse_module_specifier();
            self.expect_token(SyntaxKind::CloseParenToken);
            let data = self.finish_node(SyntaxKind::ExternalModuleReference, pos);
            return ModuleReference::External(self.alloc(ExternalModuleReference {
                data,
                expression,
            }));
        }
        ModuleReference::Entity(self.parse_entity_name())
    }

    fn parse_module_specifier(&mut self) -> Expression<'a> {
        if self.token() == SyntaxKind::StringLiteral {
            let pos = self.token_pos();
            let end = self.token_end();
            let text = self.arena.alloc_str(self.scanner.token_value());
            self.next_token();
            let data = self.finish_node_at(SyntaxKind::StringLiteral, pos, end);
            return Expression::String(self.alloc(StringLiteral { data, text }));
        }
        self.error(&messages::STRING_LITERAL_EXPECTED, &[]);
        Expression::Identifier(self.create_missing_identifier())
    }

    // ========================================================================
    // Exports
    // ========================================================================

    /// The export forms that are statements in their own right:
    /// `export = x`, `export * from`, `export { } from`.
    fn parse_export_forms(
        &mut self,
        pos: TextPos,
        modifiers: Option<NodeArray<'a, Modifier>>,
    ) -> Statement<'a> {
        debug_assert!(modifiers.is_none());
        let list_pos = self.token_pos();
        let export_token = self.consume_token();
        let modifiers = Some(NodeArray::new(
            list_pos,
            export_token.data.end(),
            self.arena.alloc_vec(vec![export_token]),
        ));

        if self.parse_optional(SyntaxKind::EqualsToken) {
            let expression = self.allow_in_and(|p| p.parse_assignment_expression_or_higher());
            self.parse_expected_semicolon();
            let data = self.finish_node(SyntaxKind::ExportAssignment, pos);
            return Statement::ExportAssignment(self.alloc(ExportAssignment {
                data,
                modifiers,
                is_export_equals: true,
                expression,
            }));
        }

        let export_clause = if self.token() == SyntaxKind::AsteriskToken {
            let clause_pos = self.token_pos();
            self.next_token();
            if self.parse_optional(SyntaxKind::AsKeyword) {
                let name = self.parse_identifier();
                let data = self.finish_node(SyntaxKind::NamespaceExport, clause_pos);
                Some(NamedExportBindings::Namespace(
                    self.alloc(NamespaceExport { data, name }),
                ))
            } else {
                None
            }
        } else {
            let clause_pos = self.token_pos();
            self.expect_token(SyntaxKind::OpenBraceToken);
            let elements = self.parse_delimited_list(
                ParsingContext::IMPORT_OR_EXPORT_SPECIFIERS,
                |p| p.parse_export_specifier(),
            );
            self.expect_token(SyntaxKind::CloseBraceToken);
            let data = self.finish_node(SyntaxKind::NamedExports, clause_pos);
            Some(NamedExportBindings::Named(
                self.alloc(NamedExports { data, elements }),
            ))
        };

        let module_specifier = if self.parse_optional(SyntaxKind::FromKeyword) {
            Some(self.parse_module_specifier())
        } else {
            None
        };
        self.parse_expected_semicolon();
        let data = self.finish_node(SyntaxKind::ExportDeclaration, pos);
        Statement::Export(self.alloc(ExportDeclaration {
            data,
            modifiers,
            export_clause,
            module_specifier,
        }))
    }

    fn parse_export_specifier(&mut self) -> &'a ExportSpecifier<'a> {
        let pos = self.token_pos();
        let first = self.parse_identifier_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
            (Some(first), self.parse_identifier_name())
        } else {
            (None, first)
        };
        let data = self.finish_node(SyntaxKind::ExportSpecifier, pos);
        self.alloc(ExportSpecifier {
            data,
            property_name,
            name,
        })
    }
}

fn has_modifier_kind(modifiers: &Option<NodeArray<'_, Modifier>>, kind: SyntaxKind) -> bool {
    modifiers
        .as_ref()
        .is_some_and(|list| list.iter().any(|m| m.kind() == kind))
}
